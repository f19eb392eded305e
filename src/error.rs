/// Error types for the download steps
///
/// Each step of the workflow reports its own error type. The workflow
/// collapses all of them into a plain success/failure before anything
/// reaches the UI, so these exist for logging and tests.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of the network step
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be built or sent (bad URL, DNS, refused, TLS)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned status {0}")]
    Status(u16),
}

/// Failure of the decode step
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is empty")]
    Empty,

    #[error("not a supported image: {0}")]
    Image(#[from] image::ImageError),
}

/// Failure of the store step
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}
