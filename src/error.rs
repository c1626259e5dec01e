//! # Error Types
//!
//! Every fatal failure in the pipeline surfaces as a [`TideError`]. Parse
//! mismatches inside the tide table are not errors: they are skipped and
//! logged, so this enum only covers reading the input, decoding the PDF,
//! loading configuration and writing the output.

use std::io;
use thiserror::Error;

/// Errors that can terminate a conversion run.
#[derive(Error, Debug)]
pub enum TideError {
    /// Input or output file operations failed (missing file, permissions, disk space)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The PDF library could not decode the document
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file exists but is not valid
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The finished output could not be moved into place
    #[error("could not persist output: {0}")]
    Persist(#[from] tempfile::PersistError),
}
