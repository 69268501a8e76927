//! Unified error system for Gantt Bridge.
//!
//! Provides structured errors for the schedule pipeline and the record sync
//! layer. Errors serialize to JSON so a hosting UI can display them with
//! recovery hints instead of a raw string.
//!
//! # Usage
//!
//! ```rust
//! use gantt_bridge::error::{GanttError, ErrorCode};
//! use gantt_bridge::gantt_err;
//!
//! // Create a new error
//! let err = GanttError::new(ErrorCode::FetchFailed, "Schedule query rejected");
//!
//! // With context
//! let err = gantt_err!(InvalidColorFormat, "not a hex colour: {}", "teal");
//!
//! // From std::io::Error
//! let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
//! let err: GanttError = io_error.into();
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes grouped by pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    // Transform errors (1xxx)
    InvalidColorFormat = 1001,
    DanglingParentReference = 1002,

    // Fetch errors (2xxx)
    FetchFailed = 2001,
    SnapshotNotFound = 2002,
    SnapshotParseError = 2003,

    // Sync errors (3xxx)
    RecordCreateFailed = 3001,
    RecordUpdateFailed = 3002,
    RecordDeleteFailed = 3003,
    UnknownEntityKind = 3004,
    RecordNotFound = 3005,

    // IO errors (4xxx)
    FileNotFound = 4001,
    FilePermissionDenied = 4002,
    NetworkUnreachable = 4003,
    NetworkTimeout = 4004,
    FileReadFailed = 4005,

    // Unknown/fallback
    Unknown = 0,
}

impl ErrorCode {
    /// Get the category name for this error code.
    pub fn category(&self) -> &'static str {
        match (*self as u16) / 1000 {
            1 => "transform",
            2 => "fetch",
            3 => "sync",
            4 => "io",
            _ => "unknown",
        }
    }

    /// Whether this error is typically recoverable.
    ///
    /// Transform errors indicate bad source data and need a data fix;
    /// fetch, sync and network errors can be retried as-is.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ErrorCode::InvalidColorFormat
                | ErrorCode::DanglingParentReference
                | ErrorCode::UnknownEntityKind
                | ErrorCode::SnapshotParseError
                | ErrorCode::FileNotFound
                | ErrorCode::FilePermissionDenied
        )
    }

    /// Default recovery hints for this error code.
    pub fn default_hints(&self) -> Vec<&'static str> {
        match self {
            ErrorCode::FetchFailed => vec![
                "Refresh the timeline to retry the query",
                "Check that the record store is reachable",
            ],
            ErrorCode::InvalidColorFormat => {
                vec!["Fix the group colour to a 6-digit hex value like #3366CC"]
            }
            ErrorCode::DanglingParentReference => vec![
                "The task references a parent that was not fetched",
                "Check the parent record still exists, then refresh",
            ],
            ErrorCode::RecordCreateFailed
            | ErrorCode::RecordUpdateFailed
            | ErrorCode::RecordDeleteFailed => vec![
                "Retry the edit",
                "Refresh the timeline to resync local and remote state",
            ],
            ErrorCode::SnapshotNotFound => vec!["Check the snapshot path is correct"],
            ErrorCode::SnapshotParseError => {
                vec!["The snapshot file is not valid schedule JSON"]
            }
            ErrorCode::FileNotFound => vec![
                "Check if the path is correct",
                "Verify the file exists",
            ],
            ErrorCode::FilePermissionDenied => vec!["Check file permissions"],
            _ => vec![],
        }
    }
}

/// Structured error carried through the pipeline and sync layers.
///
/// Serializes to JSON so the hosting UI can render the message and the
/// recovery hints (fetch failures surface as a non-fatal notification).
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("[{error_id}] {message}")]
pub struct GanttError {
    pub error_id: String,
    pub code: u16,
    pub category: String,
    pub message: String,
    pub recoverable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recovery_hints: Vec<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub context: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl GanttError {
    /// Create a new GanttError with default hints.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let hints = code.default_hints();
        Self {
            error_id: format!("GB-{:04}", code as u16),
            code: code as u16,
            category: code.category().to_string(),
            message: message.into(),
            recoverable: code.is_recoverable(),
            recovery_hints: hints.into_iter().map(String::from).collect(),
            context: serde_json::Value::Null,
            cause: None,
        }
    }

    /// Attach structured context (e.g. the offending record id).
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    /// Add cause (original error message) for debugging.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Create from a standard error, preserving the original message as cause.
    pub fn from_error<E: std::error::Error>(code: ErrorCode, error: E) -> Self {
        Self::new(code, error.to_string()).with_cause(format!("{:?}", error))
    }

    /// Convert to JSON string for boundary return.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

/// Pipeline-wide result alias.
pub type Result<T> = std::result::Result<T, GanttError>;

// Convenience macro for creating errors
#[macro_export]
macro_rules! gantt_err {
    ($code:ident, $msg:expr) => {
        $crate::error::GanttError::new($crate::error::ErrorCode::$code, $msg)
    };
    ($code:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::GanttError::new(
            $crate::error::ErrorCode::$code,
            format!($fmt, $($arg)*)
        )
    };
}

// Convert std::io::Error to GanttError
impl From<std::io::Error> for GanttError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => GanttError::from_error(ErrorCode::FileNotFound, e),
            std::io::ErrorKind::PermissionDenied => {
                GanttError::from_error(ErrorCode::FilePermissionDenied, e)
            }
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted => {
                GanttError::from_error(ErrorCode::NetworkUnreachable, e)
            }
            std::io::ErrorKind::TimedOut => GanttError::from_error(ErrorCode::NetworkTimeout, e),
            _ => GanttError::from_error(ErrorCode::FileReadFailed, e),
        }
    }
}

// Convert serde_json::Error to GanttError
impl From<serde_json::Error> for GanttError {
    fn from(e: serde_json::Error) -> Self {
        GanttError::from_error(ErrorCode::SnapshotParseError, e)
    }
}
