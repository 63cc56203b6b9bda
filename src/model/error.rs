//! Error types for loading the scoring artifact.
//!
//! "Not found" is deliberately distinct from the load-failure family:
//! callers route a missing artifact differently from a corrupt one.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a scoring artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact path does not resolve to a file.
    #[error("scoring artifact not found: {}", .path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read scoring artifact {}: {source}", .path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file was read but is not a valid artifact document.
    #[error("failed to parse scoring artifact {}: {source}", .path.display())]
    Parse {
        /// Path that was being parsed
        path: PathBuf,
        /// Underlying deserialization error
        source: serde_json::Error,
    },

    /// The artifact declares a format version this build does not speak.
    #[error("unsupported artifact format version {found} (this build expects {expected})")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Version this build expects
        expected: u32,
    },

    /// The artifact parsed but is internally inconsistent.
    #[error("invalid scoring artifact: {message}")]
    Invalid {
        /// What consistency check failed
        message: String,
    },
}
