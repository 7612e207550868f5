use std::error::Error as StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Word2PdfError {
    /// The user declined to supply a directory the run needs.
    #[error("{}", cancellation_text(.operation.as_deref(), .message))]
    Cancelled {
        operation: Option<String>,
        message: String,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Office engine not available: {program}")]
    EngineNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Office engine failed: {message}")]
    Engine {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid file pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

fn cancellation_text(operation: Option<&str>, message: &str) -> String {
    match operation {
        Some(op) if !op.trim().is_empty() => format!("[{}] - {}", op, message),
        _ => message.to_string(),
    }
}

impl Word2PdfError {
    pub fn cancelled<S: Into<String>>(operation: &str, message: S) -> Self {
        Word2PdfError::Cancelled {
            operation: Some(operation.to_string()),
            message: message.into(),
        }
    }

    pub fn engine<S: Into<String>>(message: S) -> Self {
        Word2PdfError::Engine {
            message: message.into(),
            source: None,
        }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, Word2PdfError::Cancelled { .. })
    }

    /// Text of the underlying cause, if this error wraps one.
    pub fn cause_message(&self) -> Option<String> {
        self.source().map(|cause| cause.to_string())
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Word2PdfError {
    fn user_message(&self) -> String {
        match self {
            Word2PdfError::Cancelled { .. } => self.to_string(),
            Word2PdfError::EngineNotFound { program, .. } => {
                format!("Could not start the office engine '{}'", program)
            }
            Word2PdfError::Engine { message, .. } => {
                format!("Office engine error: {}", message)
            }
            Word2PdfError::InvalidPattern { pattern, .. } => {
                format!("Invalid file pattern: {}", pattern)
            }
            Word2PdfError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            Word2PdfError::InvalidPath { path } => {
                format!("Invalid directory: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Word2PdfError::EngineNotFound { .. } => Some(
                "Install LibreOffice or point --soffice (or WORD2PDF_SOFFICE) at the soffice executable.".to_string()
            ),
            Word2PdfError::InvalidPattern { .. } => Some(
                "Use a simple glob such as *.docx or *.doc*.".to_string()
            ),
            Word2PdfError::InvalidPath { .. } => Some(
                "Check that the directory exists and that you can read it.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Word2PdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_message_with_operation() {
        let error = Word2PdfError::cancelled("GetFilePaths", "No source folder selected");
        assert_eq!(error.to_string(), "[GetFilePaths] - No source folder selected");
        assert!(error.is_cancellation());
    }

    #[test]
    fn test_cancellation_message_without_operation() {
        let error = Word2PdfError::Cancelled {
            operation: None,
            message: "Stopped".to_string(),
        };
        assert_eq!(error.to_string(), "Stopped");

        let blank = Word2PdfError::Cancelled {
            operation: Some("  ".to_string()),
            message: "Stopped".to_string(),
        };
        assert_eq!(blank.to_string(), "Stopped");
    }

    #[test]
    fn test_generic_errors_are_not_cancellation() {
        let error = Word2PdfError::engine("crashed");
        assert!(!error.is_cancellation());
        assert!(error.cause_message().is_none());
    }

    #[test]
    fn test_cause_message() {
        let error = Word2PdfError::EngineNotFound {
            program: "soffice".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(error.cause_message().as_deref(), Some("no such file"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_user_friendly_messages() {
        let error = Word2PdfError::InvalidPath {
            path: "/missing".to_string(),
        };
        assert!(error.user_message().contains("/missing"));
        assert!(error.suggestion().is_some());
    }
}
