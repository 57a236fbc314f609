//! Codec capability used by the conversion pipeline
//!
//! The pipeline never touches pixel formats directly: it hands raw bytes to an
//! [`ImageCodec`] and gets either a decoded image or encoded bytes back.

mod image_rs;

pub use image_rs::{ImageRsCodec, JPEG_QUALITY};

use crate::error::ConvertError;
use crate::types::ImageKind;
use image::DynamicImage;

/// An image decoded into memory, tagged with the encoding it came from
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: DynamicImage,
    pub source_format: ImageKind,
}

impl DecodedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }
}

/// Trait for decoding and encoding raster images
pub trait ImageCodec: Send + Sync {
    /// Decode an image from its encoded bytes, detecting the source format
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, ConvertError>;

    /// Encode pixels into the requested encoding
    fn encode(&self, pixels: &DynamicImage, kind: ImageKind) -> Result<Vec<u8>, ConvertError>;
}

impl<C: ImageCodec + ?Sized> ImageCodec for std::sync::Arc<C> {
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, ConvertError> {
        (**self).decode(data)
    }

    fn encode(&self, pixels: &DynamicImage, kind: ImageKind) -> Result<Vec<u8>, ConvertError> {
        (**self).encode(pixels, kind)
    }
}
