//! Input/output helpers.
//!
//! - CSV ingest into raw records (`ingest`)
//! - forecast CSV and result JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
