//! Output format selection

use crate::error::FormatError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Raster encodings the service can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

impl ImageKind {
    /// MIME type for this encoding
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
        }
    }

    /// Map to the `image` crate's format enum
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
            ImageKind::Gif => image::ImageFormat::Gif,
        }
    }

    /// Map back from a detected `image` crate format, if it is one we handle
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(ImageKind::Png),
            image::ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            image::ImageFormat::Gif => Some(ImageKind::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Png => "PNG",
            ImageKind::Jpeg => "JPEG",
            ImageKind::Gif => "GIF",
        };
        f.write_str(name)
    }
}

/// A validated output format request.
///
/// Keeps the literal token the caller used so that `jpg` requests produce
/// `.jpg` files while `jpeg` requests produce `.jpeg` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetFormat {
    kind: ImageKind,
    token: &'static str,
}

/// Every token accepted by [`validate`], in canonical order
pub const SUPPORTED_TOKENS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

impl TargetFormat {
    pub const PNG: TargetFormat = TargetFormat {
        kind: ImageKind::Png,
        token: "png",
    };
    pub const JPG: TargetFormat = TargetFormat {
        kind: ImageKind::Jpeg,
        token: "jpg",
    };
    pub const JPEG: TargetFormat = TargetFormat {
        kind: ImageKind::Jpeg,
        token: "jpeg",
    };
    pub const GIF: TargetFormat = TargetFormat {
        kind: ImageKind::Gif,
        token: "gif",
    };

    /// The encoding to produce
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// File extension for converted files (the requested token, verbatim)
    pub fn extension(&self) -> &'static str {
        self.token
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token)
    }
}

impl FromStr for TargetFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Check a requested format token against the supported set.
///
/// Matching is case-sensitive; `jpg` and `jpeg` both select JPEG.
pub fn validate(requested: &str) -> Result<TargetFormat, FormatError> {
    match requested {
        "png" => Ok(TargetFormat::PNG),
        "jpg" => Ok(TargetFormat::JPG),
        "jpeg" => Ok(TargetFormat::JPEG),
        "gif" => Ok(TargetFormat::GIF),
        "" => Err(FormatError::Missing),
        other => Err(FormatError::Unsupported(other.to_string())),
    }
}
