//! Image upload and conversion handler

use crate::response::{self, SendError};
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use imgconv_core::{validate, BatchError, FormatError, Payload, UploadedFile, ARCHIVE_FILENAME};

/// Form field carrying the requested output format
pub const FORMAT_FIELD: &str = "format";

/// Form field carrying the uploaded images
pub const IMAGE_FIELD: &str = "image";

/// Name used when an upload arrives without a usable filename
const FALLBACK_NAME: &str = "image";

/// Typed view of the upload form
#[derive(Debug, Default)]
pub struct UploadForm {
    /// First `format` value, if any
    pub format: Option<String>,

    /// Every `image` file part, in arrival order
    pub files: Vec<UploadedFile>,
}

impl UploadForm {
    /// Drain the multipart stream. Fields may arrive in any order.
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, MultipartError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                FORMAT_FIELD => {
                    let value = field.text().await?;
                    form.format.get_or_insert(value);
                }
                IMAGE_FIELD => {
                    // Parts without a filename are plain values, not files
                    let Some(filename) = field
                        .file_name()
                        .filter(|name| !name.is_empty())
                        .map(sanitize_filename)
                    else {
                        continue;
                    };
                    let content = field.bytes().await?;
                    form.files.push(UploadedFile::new(filename, content.to_vec()));
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Strip directory components and control characters from a client filename
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Everything that can end an upload request early
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid multipart request: {0}")]
    Rejected(#[from] MultipartRejection),

    #[error("invalid multipart body: {0}")]
    Form(#[from] MultipartError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to send {filename}: {source}")]
    Send {
        filename: String,
        #[source]
        source: SendError,
    },
}

impl UploadError {
    /// Text shown to the caller
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Rejected(e) => format!("Error parsing form: {}", e),
            UploadError::Form(e) => format!("Error parsing form: {}", e),
            UploadError::Format(FormatError::Missing) => "No file format given :(".to_string(),
            UploadError::Format(FormatError::Unsupported(format)) => {
                format!("File format {} not supported :(", format)
            }
            UploadError::Batch(BatchError::NoFilesGiven) => "No files given :(".to_string(),
            UploadError::Batch(BatchError::Conversion {
                filename, source, ..
            }) if source.is_open_failure() => format!("Couldn't process file: {}", filename),
            UploadError::Batch(BatchError::Conversion {
                filename, format, ..
            }) => format!("Error converting {} to {} :(", filename, format),
            UploadError::Batch(BatchError::AllFilesFailed) => {
                "No suitable images uploaded :(".to_string()
            }
            UploadError::Batch(BatchError::Archive(e)) => {
                format!("Unable to tar requested pictures: {} :(", e)
            }
            UploadError::Task(e) => format!("Unable to convert requested pictures: {} :(", e),
            UploadError::Send { filename, source } if filename == ARCHIVE_FILENAME => {
                format!("Unable to send back requested pictures: {} :(", source)
            }
            UploadError::Send { filename, .. } => {
                format!("Couldn't send back new file {} :(", filename)
            }
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            UploadError::Task(_)
            | UploadError::Send { .. }
            | UploadError::Batch(BatchError::Archive(_)) => {
                tracing::error!("Upload failed: {}", self)
            }
            _ => tracing::debug!("Upload rejected: {}", self),
        }
        response::text(self.user_message())
    }
}

/// Convert uploaded images and send back the result.
///
/// The format is validated before any image is decoded. One file comes back
/// as-is; several come back as `images.tar`.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, UploadError> {
    let mut multipart = multipart?;
    let form = UploadForm::from_multipart(&mut multipart).await?;

    let format = validate(form.format.as_deref().unwrap_or_default())?;
    if form.files.is_empty() {
        return Err(BatchError::NoFilesGiven.into());
    }

    tracing::info!("Converting {} file(s) to {}", form.files.len(), format);

    // Decoding and encoding are CPU-bound
    let converter = state.converter.clone();
    let files = form.files;
    let Payload {
        filename,
        bytes,
        archived,
        skipped,
        ..
    } = tokio::task::spawn_blocking(move || converter.run(format, &files)).await??;

    if !skipped.is_empty() {
        tracing::info!("Skipped {} unconvertible file(s)", skipped.len());
    }

    let content_type = if archived {
        response::TAR_CONTENT_TYPE
    } else {
        response::sniff_content_type(&bytes)
    };

    response::attachment(&filename, content_type, bytes)
        .map_err(|source| UploadError::Send { filename, source })
}
