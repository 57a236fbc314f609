//! Building responses sent back to the caller

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Offset of the ustar magic inside a tar header block
const TAR_MAGIC_OFFSET: usize = 257;

/// Content type sent with `images.tar`
pub const TAR_CONTENT_TYPE: &str = "application/x-tar";

/// Failure to assemble an attachment response
#[derive(Debug, thiserror::Error)]
#[error("could not build response headers: {0}")]
pub struct SendError(#[from] axum::http::Error);

/// Plain-text message body.
///
/// Every failure the service reports goes through here with status 200.
pub fn text(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message.into(),
    )
        .into_response()
}

/// Binary attachment with an explicit content type and exact length
pub fn attachment(
    filename: &str,
    content_type: &'static str,
    bytes: Vec<u8>,
) -> Result<Response, SendError> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_DISPOSITION, content_disposition(filename))
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))?;
    Ok(response)
}

/// Guess a MIME type from leading bytes.
///
/// A tar archive starts with its first entry's name, so the ustar magic is
/// checked before any image signature.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if bytes
        .get(TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5)
        .is_some_and(|magic| magic == b"ustar")
    {
        return TAR_CONTENT_TYPE;
    }
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    "application/octet-stream"
}

/// `Content-Disposition` value for `filename`.
///
/// Names that are not plain printable ASCII get an underscore-substituted
/// fallback plus an RFC 5987 `filename*` parameter carrying the real name.
pub fn content_disposition(filename: &str) -> HeaderValue {
    let plain = |c: char| (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\';

    let value = if filename.chars().all(plain) {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        let fallback: String = filename
            .chars()
            .map(|c| if plain(c) { c } else { '_' })
            .collect();
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    };

    // Only printable ASCII remains at this point
    HeaderValue::from_str(&value)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
