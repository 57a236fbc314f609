//! Info command implementation

use anyhow::{Context, Result};
use imgconv_core::{ImageCodec, ImageKind, ImageRsCodec};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Image info output
#[derive(Serialize)]
struct ImageInfo {
    format: ImageKind,
    mime_type: &'static str,
    width: u32,
    height: u32,
    color: String,
    bytes: usize,
}

/// Display information about an image
pub fn info(input: &Path, json: bool) -> Result<()> {
    let data = fs::read(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;

    let decoded = ImageRsCodec::new()
        .decode(&data)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let (width, height) = decoded.dimensions();
    let info = ImageInfo {
        format: decoded.source_format,
        mime_type: decoded.source_format.mime_type(),
        width,
        height,
        color: format!("{:?}", decoded.pixels.color()),
        bytes: data.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Format:      {}", info.format);
        println!("MIME type:   {}", info.mime_type);
        println!("Dimensions:  {}x{}", info.width, info.height);
        println!("Color:       {}", info.color);
        println!("Size:        {} bytes", info.bytes);
    }

    Ok(())
}
