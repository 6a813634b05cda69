//! CLI error types and exit codes

use thiserror::Error;

/// Exit codes:
/// - 0: Success
/// - 1: Invalid invocation (including an unknown provision mode) or
///      general error
/// - 3: Directory/registry API error
/// - 4: Validation error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid mode '{0}'; allowed modes: add, delete")]
    InvalidMode(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid JSON: {0}")]
    Json(String),

    #[error("Directory API error: {0}")]
    Connector(#[from] idlink_connector::error::ConnectorError),
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidMode(_) | CliError::Io(_) => 1,
            CliError::Connector(_) => 3,
            CliError::Validation(_) | CliError::Json(_) => 4,
        }
    }

    /// Print the error to stderr.
    pub fn print(&self) {
        eprintln!("Error: {self}");
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_exits_one() {
        assert_eq!(CliError::InvalidMode("frobnicate".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_connector_errors_exit_three() {
        let err = CliError::from(idlink_connector::error::ConnectorError::network("down"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_invalid_mode_message_names_the_mode() {
        let err = CliError::InvalidMode("frobnicate".to_string());
        assert!(err.to_string().contains("frobnicate"));
    }
}
