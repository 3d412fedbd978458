use bytes::Bytes;
use futures::StreamExt;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use pyrus_sdk::ApiError;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::error::ClientError;

/// Where the caller wants the response to go.
pub(crate) enum ResponseSink<'a> {
    /// The caller does not look at the response.
    Discard,
    /// The caller expects a JSON document.
    Json,
    /// The caller expects a file and streams it into this writer.
    File(&'a mut (dyn AsyncWrite + Send + Unpin)),
}

/// What was read from a response.
#[derive(Debug)]
pub(crate) enum Payload {
    None,
    Json(Bytes),
    File { filename: String },
}

/// Parsed `Content-Disposition` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentDisposition {
    pub disposition: String,
    pub filename: Option<String>,
}

/// Responses without a parsable media type are treated as JSON.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_none_or(|mime| mime.essence_str() == mime::APPLICATION_JSON.essence_str())
}

/// Parses `attachment; filename="report.pdf"`.
///
/// Accepts quoted and bare filenames and prefers an RFC 5987 `filename*`
/// parameter when both are present.
pub(crate) fn parse_content_disposition(value: &str) -> Result<ContentDisposition, ClientError> {
    let malformed = || ClientError::unexpected(format!("malformed Content-Disposition: {value}"));

    let (disposition, mut rest) = match value.split_once(';') {
        Some((disposition, rest)) => (disposition, rest),
        None => (value, ""),
    };
    let disposition = disposition.trim().to_ascii_lowercase();
    if disposition.is_empty() || disposition.contains(char::is_whitespace) {
        return Err(malformed());
    }

    let mut filename = None;
    let mut extended = None;
    loop {
        rest = rest.trim_start_matches(|c: char| c == ';' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }
        let (name, after) = rest.split_once('=').ok_or_else(malformed)?;
        if name.contains(';') {
            return Err(malformed());
        }
        let name = name.trim().to_ascii_lowercase();
        let after = after.trim_start();

        let param = if let Some(quoted) = after.strip_prefix('"') {
            let (param, remaining) = read_quoted(quoted).ok_or_else(malformed)?;
            rest = remaining;
            param
        } else {
            let end = after.find(';').unwrap_or(after.len());
            rest = &after[end..];
            after[..end].trim_end().to_owned()
        };

        match name.as_str() {
            "filename" => filename = Some(param),
            "filename*" => extended = decode_extended(&param),
            _ => {}
        }
    }

    Ok(ContentDisposition {
        disposition,
        filename: extended.or(filename).filter(|name| !name.is_empty()),
    })
}

/// Reads a quoted-string body (after the opening quote). Returns the unescaped
/// value and the input left after the closing quote.
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => value.push(chars.next()?.1),
            '"' => return Some((value, &input[index + 1..])),
            _ => value.push(ch),
        }
    }
    None
}

/// Decodes `UTF-8''na%C3%AFve.txt`.
fn decode_extended(value: &str) -> Option<String> {
    let (charset, rest) = value.split_once('\'')?;
    let (_language, encoded) = rest.split_once('\'')?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|name| name.into_owned())
}

/// Filename of a file response, or the reason the response is not one.
fn attachment_filename(headers: &HeaderMap) -> Result<String, ClientError> {
    let value = headers
        .get(CONTENT_DISPOSITION)
        .ok_or_else(|| ClientError::unexpected("attachment expected"))?
        .to_str()
        .map_err(|_| ClientError::unexpected("malformed Content-Disposition"))?;

    let parsed = parse_content_disposition(value)?;
    if parsed.disposition != "attachment" {
        return Err(ClientError::unexpected("attachment expected"));
    }
    parsed
        .filename
        .ok_or_else(|| ClientError::unexpected("file has no name"))
}

/// Classifies a response and reads it into the sink.
///
/// Non-JSON responses are files and go to the writer. JSON responses with a
/// status other than 200 are decoded into [`ApiError`].
pub(crate) async fn read_payload(
    response: reqwest::Response,
    sink: ResponseSink<'_>,
) -> Result<Payload, ClientError> {
    let status = response.status();

    if !is_json(response.headers()) {
        let filename = attachment_filename(response.headers()).inspect_err(|e| {
            warn!(status = %status, error = %e, "unusable file response");
        })?;
        let ResponseSink::File(writer) = sink else {
            warn!(status = %status, "file response where JSON was expected");
            return Err(ClientError::unexpected("writer expected"));
        };

        let mut stream = response.bytes_stream();
        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len();
        }
        writer.flush().await?;
        debug!(filename = %filename, bytes = written, "file downloaded");
        return Ok(Payload::File { filename });
    }

    let bytes = response.bytes().await?;
    if status != StatusCode::OK {
        let api_error: ApiError = serde_json::from_slice(&bytes)?;
        warn!(status = %status, code = %api_error.code, "API error");
        return Err(ClientError::Api(api_error));
    }

    match sink {
        ResponseSink::File(_) => Err(ClientError::unexpected("attachment expected")),
        ResponseSink::Json | ResponseSink::Discard => Ok(Payload::Json(bytes)),
    }
}
