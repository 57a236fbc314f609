//! Batch orchestration over uploaded files

use crate::archive::{self, ArchiveEntry, ARCHIVE_FILENAME};
use crate::codec::ImageCodec;
use crate::convert::{ConversionResult, Converter};
use crate::error::BatchError;
use crate::types::{ImageSource, TargetFormat};
use rayon::prelude::*;

/// What the caller gets back from a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Name to send the bytes under
    pub filename: String,

    /// Converted image, or tar archive of converted images
    pub bytes: Vec<u8>,

    /// Whether `bytes` is an archive
    pub archived: bool,

    /// Number of files included
    pub converted: usize,

    /// Original names of files that were skipped
    pub skipped: Vec<String>,
}

/// Runs conversions across a set of inputs and packages the results
#[derive(Debug, Clone)]
pub struct BatchConverter<C> {
    converter: Converter<C>,
    parallel: bool,
}

impl<C: ImageCodec> BatchConverter<C> {
    pub fn new(codec: C) -> Self {
        Self {
            converter: Converter::new(codec),
            parallel: false,
        }
    }

    /// Convert multi-file batches on the rayon pool.
    ///
    /// Results are collected back in input order, so the archive is identical
    /// to a sequential run.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Convert `files` to `format`.
    ///
    /// A single file is returned as-is and any failure is terminal. Two or
    /// more files are archived; files that fail are skipped, and the batch only
    /// fails if none of them converted.
    pub fn run<S: ImageSource>(
        &self,
        format: TargetFormat,
        files: &[S],
    ) -> Result<Payload, BatchError> {
        match files {
            [] => Err(BatchError::NoFilesGiven),
            [only] => self.run_single(format, only),
            many => self.run_many(format, many),
        }
    }

    fn run_single<S: ImageSource>(
        &self,
        format: TargetFormat,
        file: &S,
    ) -> Result<Payload, BatchError> {
        match self.converter.convert_source(format, file) {
            ConversionResult::Converted { filename, bytes } => {
                tracing::debug!("Converted {} -> {}", file.name(), filename);
                Ok(Payload {
                    filename,
                    bytes,
                    archived: false,
                    converted: 1,
                    skipped: Vec::new(),
                })
            }
            ConversionResult::Failed {
                original_filename,
                cause,
            } => Err(BatchError::Conversion {
                filename: original_filename,
                format: format.to_string(),
                source: cause,
            }),
        }
    }

    fn run_many<S: ImageSource>(
        &self,
        format: TargetFormat,
        files: &[S],
    ) -> Result<Payload, BatchError> {
        let results: Vec<ConversionResult> = if self.parallel {
            files
                .par_iter()
                .map(|file| self.converter.convert_source(format, file))
                .collect()
        } else {
            files
                .iter()
                .map(|file| self.converter.convert_source(format, file))
                .collect()
        };

        let mut entries = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();

        for result in results {
            match result {
                ConversionResult::Converted { filename, bytes } => {
                    entries.push(ArchiveEntry::new(filename, bytes));
                }
                ConversionResult::Failed {
                    original_filename,
                    cause,
                } => {
                    tracing::warn!("Skipping {}: {}", original_filename, cause);
                    skipped.push(original_filename);
                }
            }
        }

        if entries.is_empty() {
            return Err(BatchError::AllFilesFailed);
        }

        let bytes = archive::build(&entries)?;
        tracing::info!(
            "Archived {} of {} files as {}",
            entries.len(),
            files.len(),
            format
        );

        Ok(Payload {
            filename: ARCHIVE_FILENAME.to_string(),
            bytes,
            archived: true,
            converted: entries.len(),
            skipped,
        })
    }
}
