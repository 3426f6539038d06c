//! Error types for style loading and activation.
//!
//! Only failures a caller can act on surface here. Malformed keys, unknown
//! sections and entries dropped at a capacity ceiling are skipped during a
//! load and reported through `tracing` instead.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by loading, scanning and activation.
#[derive(Debug, Error)]
pub enum Error {
    /// A style file requested by the caller does not exist or cannot be opened.
    #[error("could not open interpretation file: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading an already opened file failed part way through.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Growing one of a style's collections failed to allocate.
    #[error("out of memory while growing {what}")]
    OutOfMemory {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// No discovered style folder matches the requested name.
    #[error("interpretation style '{name}' not found")]
    StyleNotFound { name: String },

    /// The style registry is full.
    #[error("maximum interpretation styles loaded ({max})")]
    TooManyStyles { max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let err = Error::FileNotFound {
            path: PathBuf::from("/styles/missing.ais"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/styles/missing.ais"));
    }

    #[test]
    fn test_style_not_found_display() {
        let err = Error::StyleNotFound {
            name: "vedic".to_string(),
        };
        assert_eq!(err.to_string(), "interpretation style 'vedic' not found");
    }

    #[test]
    fn test_too_many_styles_display() {
        let err = Error::TooManyStyles { max: 32 };
        assert!(err.to_string().contains("32"));
    }
}
