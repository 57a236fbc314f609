//! Core types shared by the conversion pipeline

mod format;
mod upload;

pub use format::{validate, ImageKind, TargetFormat, SUPPORTED_TOKENS};
pub use upload::{FileSource, ImageSource, UploadedFile};
