//! # svgpath Common
//!
//! Error types and logging configuration shared by the svgpath tools.
//!
//! ## Features
//!
//! - Tool-level error type with backtrace support
//! - Logging configuration and setup
//! - Result and Option extension traits

use thiserror::Error;

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};

/// Unified error type for the svgpath tools.
#[derive(Error, Debug)]
pub enum SvgPathError {
    /// I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors.
    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Path data that could not be compiled.
    #[error("Compile error: {message}")]
    Compile { message: String },

    /// Internal error (unexpected).
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        backtrace: Option<backtrace::Backtrace>,
    },
}

impl SvgPathError {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config error with source.
    pub fn config_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a compile error.
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile {
            message: message.into(),
        }
    }

    /// Create an internal error with backtrace.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            backtrace: Some(backtrace::Backtrace::new()),
        }
    }

    /// Get the error category for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            SvgPathError::Io(_) => "io",
            SvgPathError::InvalidArgument(_) => "invalid_argument",
            SvgPathError::Config { .. } => "config",
            SvgPathError::Compile { .. } => "compile",
            SvgPathError::Internal { .. } => "internal",
        }
    }
}

/// Result type alias for svgpath tool operations.
pub type Result<T> = std::result::Result<T, SvgPathError>;

/// Extension trait for Result.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| SvgPathError::Internal {
            message: format!("{}: {}", message.into(), e),
            backtrace: Some(backtrace::Backtrace::new()),
        })
    }
}

/// Extension trait for Option.
pub trait OptionExt<T> {
    /// Convert None to an InvalidArgument error.
    fn ok_or_invalid(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_invalid(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| SvgPathError::InvalidArgument(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(SvgPathError::config("test").category(), "config");
        assert_eq!(SvgPathError::compile("test").category(), "compile");
        assert_eq!(SvgPathError::internal("test").category(), "internal");
        assert_eq!(
            SvgPathError::InvalidArgument("test".into()).category(),
            "invalid_argument"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: SvgPathError = io.into();
        assert_eq!(err.category(), "io");
        assert_eq!(err.to_string(), "IO error: missing.txt");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.context("writing report").unwrap_err();
        assert!(matches!(err, SvgPathError::Internal { .. }));
        assert!(err.to_string().starts_with("Internal error: writing report: "));
    }

    #[test]
    fn test_option_ext() {
        let some: Option<i32> = Some(42);
        assert_eq!(some.ok_or_invalid("test").unwrap(), 42);

        let none: Option<i32> = None;
        assert!(matches!(
            none.ok_or_invalid("no path data given"),
            Err(SvgPathError::InvalidArgument(_))
        ));
    }
}
