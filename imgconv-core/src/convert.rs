//! Single-file conversion

use crate::codec::ImageCodec;
use crate::error::ConvertError;
use crate::types::{ImageSource, TargetFormat};
use std::io::Read;

/// Outcome of converting one input
#[derive(Debug)]
pub enum ConversionResult {
    Converted {
        filename: String,
        bytes: Vec<u8>,
    },
    Failed {
        original_filename: String,
        cause: ConvertError,
    },
}

impl ConversionResult {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionResult::Converted { .. })
    }
}

/// Converts one image at a time through an [`ImageCodec`]
#[derive(Debug, Clone, Default)]
pub struct Converter<C> {
    codec: C,
}

impl<C: ImageCodec> Converter<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Read `input` fully, decode it, and re-encode it as `format`
    pub fn convert(
        &self,
        format: TargetFormat,
        input: &mut dyn Read,
    ) -> Result<Vec<u8>, ConvertError> {
        let mut data = Vec::new();
        input.read_to_end(&mut data).map_err(ConvertError::Open)?;

        let decoded = self.codec.decode(&data)?;
        tracing::debug!(
            "Decoded {}x{} {} image",
            decoded.pixels.width(),
            decoded.pixels.height(),
            decoded.source_format
        );

        self.codec.encode(&decoded.pixels, format.kind())
    }

    /// Open `source`, convert it, and name the result after the target format.
    ///
    /// The source reader is released before this returns, whatever the outcome.
    pub fn convert_source<S: ImageSource + ?Sized>(
        &self,
        format: TargetFormat,
        source: &S,
    ) -> ConversionResult {
        let original_filename = source.name().to_string();

        let converted = source
            .open()
            .map_err(ConvertError::Open)
            .and_then(|mut reader| self.convert(format, &mut *reader));

        match converted {
            Ok(bytes) => ConversionResult::Converted {
                filename: replace_extension(&original_filename, format),
                bytes,
            },
            Err(cause) => ConversionResult::Failed {
                original_filename,
                cause,
            },
        }
    }
}

/// Swap the extension of `name` for the target format's extension.
///
/// The extension is everything from the last `.` in the final `/`-separated
/// component. Names without one get the new extension appended.
pub fn replace_extension(name: &str, format: TargetFormat) -> String {
    let stem = match name.rfind(['.', '/']) {
        Some(idx) if name.as_bytes()[idx] == b'.' => &name[..idx],
        _ => name,
    };
    format!("{}.{}", stem, format.extension())
}
