//! Data preparation: record validation and daily aggregation.

pub mod aggregate;
pub mod validate;

pub use aggregate::*;
pub use validate::*;
