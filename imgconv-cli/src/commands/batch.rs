//! Batch conversion command implementation

use anyhow::{Context, Result};
use imgconv_core::{validate, BatchConverter, FileSource, ImageRsCodec};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Convert several images; one input is written as-is, more become a tar archive
pub fn batch(inputs: &[PathBuf], format: &str, output: Option<&Path>, jobs: usize) -> Result<()> {
    let format = validate(format).with_context(|| format!("Invalid output format '{}'", format))?;

    let sources: Vec<FileSource> = inputs.iter().map(FileSource::new).collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to start worker pool")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {} files to {}...", sources.len(), format.kind()));

    let converter = BatchConverter::new(ImageRsCodec::new()).with_parallel(jobs > 1);
    let payload = pool
        .install(|| converter.run(format, &sources))
        .context("Batch conversion failed")?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&payload.filename));
    fs::write(&output_path, &payload.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    pb.finish_and_clear();

    for name in &payload.skipped {
        tracing::warn!("Skipped {}", name);
    }

    println!("Batch conversion complete:");
    println!("  Converted: {}", payload.converted);
    println!("  Skipped:   {}", payload.skipped.len());
    println!("  Output:    {}", output_path.display());

    Ok(())
}
