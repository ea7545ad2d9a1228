//! Error types for patsplit library.

use std::io;
use thiserror::Error;

/// Result type alias for patsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during patent section analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The matching algorithm selector is not recognized.
    #[error("Unsupported match algorithm: {0} (expected \"v2\" or \"v3\")")]
    UnsupportedAlgorithm(String),

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The page renderer failed.
    #[error("Render error: {0}")]
    Render(String),

    /// The OCR engine failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// The OCR engine did not answer in time.
    #[error("OCR timed out on page {page} after {timeout_ms} ms")]
    OcrTimeout {
        /// 0-based page index
        page: usize,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// A label sequence still contained `unknown` where a resolved one was required.
    #[error("Page {0} has no resolved section")]
    UnresolvedPage(usize),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedAlgorithm("v4".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported match algorithm: v4 (expected \"v2\" or \"v3\")"
        );

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::OcrTimeout {
            page: 3,
            timeout_ms: 500,
        };
        assert_eq!(err.to_string(), "OCR timed out on page 3 after 500 ms");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
