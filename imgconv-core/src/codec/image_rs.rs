//! Codec backed by the `image` crate

use super::{DecodedImage, ImageCodec};
use crate::error::ConvertError;
use crate::types::ImageKind;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// JPEG output is always written at maximum quality
pub const JPEG_QUALITY: u8 = 100;

/// Default codec: PNG, JPEG and GIF through the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsCodec;

impl ImageRsCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for ImageRsCodec {
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, ConvertError> {
        let format = image::guess_format(data)
            .map_err(|e| ConvertError::Decode(format!("unrecognized image data: {}", e)))?;

        let source_format = ImageKind::from_image_format(format).ok_or_else(|| {
            ConvertError::Decode(format!("unsupported source format: {:?}", format))
        })?;

        let pixels = image::load_from_memory_with_format(data, format)
            .map_err(|e| ConvertError::Decode(e.to_string()))?;

        Ok(DecodedImage {
            pixels,
            source_format,
        })
    }

    fn encode(&self, pixels: &DynamicImage, kind: ImageKind) -> Result<Vec<u8>, ConvertError> {
        let mut output = Vec::new();

        let result = match kind {
            ImageKind::Png => pixels.write_to(&mut Cursor::new(&mut output), ImageFormat::Png),
            ImageKind::Jpeg => {
                // JPEG has no alpha channel
                let rgb = pixels.to_rgb8();
                JpegEncoder::new_with_quality(&mut output, JPEG_QUALITY).encode_image(&rgb)
            }
            ImageKind::Gif => {
                let rgba = DynamicImage::ImageRgba8(pixels.to_rgba8());
                rgba.write_to(&mut Cursor::new(&mut output), ImageFormat::Gif)
            }
        };

        result.map_err(|e| ConvertError::Encode(e.to_string()))?;
        Ok(output)
    }
}
