//! Convert command implementation

use anyhow::{Context, Result};
use imgconv_core::{validate, Converter, ImageRsCodec};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Convert one image, failing on any error
pub fn convert(input: &Path, output: &Path, format: &str) -> Result<()> {
    let format = validate(format).with_context(|| format!("Invalid output format '{}'", format))?;

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading input file...");
    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let mut reader = BufReader::new(file);

    pb.set_message(format!("Converting to {}...", format.kind()));
    let bytes = Converter::new(ImageRsCodec::new())
        .convert(format, &mut reader)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    fs::write(output, &bytes)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    tracing::info!("Wrote {} bytes to {}", bytes.len(), output.display());
    pb.finish_with_message(format!(
        "Converted {} to {} -> {}",
        input.display(),
        format.kind(),
        output.display()
    ));

    Ok(())
}
