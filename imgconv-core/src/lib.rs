//! imgconv Core Library
//!
//! This crate provides the conversion pipeline for the imgconv service.
//! Uploaded images are decoded through an [`ImageCodec`], re-encoded into a
//! single target format, and either returned directly or bundled into a
//! tar archive when more than one file was converted.

pub mod archive;
pub mod batch;
pub mod codec;
pub mod convert;
pub mod error;
pub mod types;

pub use archive::{ArchiveEntry, ARCHIVE_FILENAME};
pub use batch::{BatchConverter, Payload};
pub use codec::{DecodedImage, ImageCodec, ImageRsCodec};
pub use convert::{replace_extension, ConversionResult, Converter};
pub use error::{ArchiveError, BatchError, ConvertError, FormatError, ImgconvError, Result};
pub use types::{validate, FileSource, ImageKind, ImageSource, TargetFormat, UploadedFile};

/// Validate `requested` and run the batch in one step
pub fn convert_batch<C: ImageCodec, S: ImageSource>(
    converter: &BatchConverter<C>,
    requested: &str,
    files: &[S],
) -> Result<Payload> {
    let format = validate(requested)?;
    Ok(converter.run(format, files)?)
}
