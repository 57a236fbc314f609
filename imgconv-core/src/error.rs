//! Error types for imgconv core

use thiserror::Error;

/// Result type alias using ImgconvError
pub type Result<T> = std::result::Result<T, ImgconvError>;

/// Top-level error type for a whole conversion request
#[derive(Debug, Error)]
pub enum ImgconvError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),
}

/// Errors raised while validating the requested output format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no output format given")]
    Missing,

    #[error("output format {0:?} is not supported")]
    Unsupported(String),
}

/// Per-file errors produced by a single conversion attempt
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not open input: {0}")]
    Open(#[source] std::io::Error),

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("could not encode image: {0}")]
    Encode(String),
}

/// Errors that occur while serializing the tar archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to write entry {name}: {source}")]
    Entry {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to finalize archive: {0}")]
    Finish(#[source] std::io::Error),
}

/// Terminal outcomes of a batch run
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("no files given")]
    NoFilesGiven,

    #[error("failed to convert {filename} to {format}: {source}")]
    Conversion {
        filename: String,
        format: String,
        #[source]
        source: ConvertError,
    },

    #[error("no suitable images uploaded")]
    AllFilesFailed,

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl ConvertError {
    /// Whether the input could not even be opened
    pub fn is_open_failure(&self) -> bool {
        matches!(self, ConvertError::Open(_))
    }
}
