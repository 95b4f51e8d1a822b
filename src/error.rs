//! Custom error types for Reportity
//!
//! Every failure inside a render call surfaces as a single [`ReportError`].
//! Callers never see the document backend's or the image decoder's native
//! error types.

use thiserror::Error;

/// The main error type for Reportity operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// The record type has nothing that can be rendered as a column
    #[error("Schema error: {0}")]
    Schema(String),

    /// A resource referenced by the report (the logo) could not be used
    #[error("Resource error for '{path}': {message}")]
    Resource { path: String, message: String },

    /// The document backend failed during layout or serialization
    #[error("Backend error: {0}")]
    Backend(String),

    /// Invalid report options
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Input records could not be loaded
    #[error("Input error: {0}")]
    Input(String),
}

impl ReportError {
    /// Create a resource error for the given path
    pub fn resource(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resource {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Check if this is a resource error
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource { .. })
    }

    /// Check if this is a backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Input(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        Self::Input(err.to_string())
    }
}

/// Result type alias for Reportity operations
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Schema("no exportable fields".into());
        assert_eq!(err.to_string(), "Schema error: no exportable fields");
    }

    #[test]
    fn test_resource_error() {
        let err = ReportError::resource("logo.png", "file not found");
        assert_eq!(
            err.to_string(),
            "Resource error for 'logo.png': file not found"
        );
        assert!(err.is_resource());
        assert!(!err.is_schema());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReportError = io_err.into();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ReportError = json_err.into();
        assert!(matches!(err, ReportError::Input(_)));
    }
}
