//! Error types for tonectl

use thiserror::Error;
use tonecurve::{CurveError, ErrorKind};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) => 2,
            CliError::Io(_) | CliError::Json(_) => 3,
            CliError::Curve(err) => match err.kind() {
                ErrorKind::InvalidInput => 4,
                ErrorKind::OutOfRange => 5,
            },
        }
    }

    /// Short machine-readable name used in JSON error output.
    pub fn type_name(&self) -> &'static str {
        match self {
            CliError::Curve(err) => match err.kind() {
                ErrorKind::InvalidInput => "InvalidInput",
                ErrorKind::OutOfRange => "OutOfRange",
            },
            CliError::InvalidArgument(_) => "InvalidArgument",
            CliError::Io(_) => "Io",
            CliError::Json(_) => "Json",
        }
    }
}
