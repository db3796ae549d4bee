//! Error types.
//!
//! - `PipelineError`: the hard failures the core pipeline can produce.
//! - `AppError`: what the binary and its collaborators (ingest, exports, CLI)
//!   return; carries the process exit code.

use chrono::NaiveDate;
use thiserror::Error;

/// Which pipeline stage ran out of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preprocess,
    Aggregate,
    Fit,
    Forecast,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Preprocess => "preprocess",
            Stage::Aggregate => "aggregate",
            Stage::Fit => "fit",
            Stage::Forecast => "forecast",
        };
        f.write_str(name)
    }
}

/// Hard failures of the core pipeline.
///
/// Malformed records are not errors: the validator drops and counts them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("insufficient data for {stage}: need at least {required}, got {actual}")]
    InsufficientData {
        stage: Stage,
        required: usize,
        actual: usize,
    },
    /// Projecting past `last` would leave the representable calendar.
    #[error("cannot forecast {horizon} days past {last}: date out of range")]
    DateOutOfRange { last: NaiveDate, horizon: usize },
}

impl PipelineError {
    pub(crate) fn insufficient(stage: Stage, required: usize, actual: usize) -> Self {
        PipelineError::InsufficientData {
            stage,
            required,
            actual,
        }
    }
}

/// Exit code for usage, input and I/O problems.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for batches that do not carry enough usable data.
pub const EXIT_INSUFFICIENT: u8 = 3;
/// Exit code for internal failures.
pub const EXIT_INTERNAL: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let exit_code = match err {
            PipelineError::InsufficientData { .. } => EXIT_INSUFFICIENT,
            PipelineError::DateOutOfRange { .. } => EXIT_INPUT,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
