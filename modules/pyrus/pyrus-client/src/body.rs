use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::ClientError;

/// Multipart field name the upload endpoint reads the file from.
pub(crate) const FILE_FIELD: &str = "file";

/// Request body of one logical call.
///
/// Bodies are fully prepared before the first attempt so the replay after a
/// token refresh sends the same bytes.
pub(crate) enum RequestBody {
    Empty,
    Json(Bytes),
    File { filename: String, content: Bytes },
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "RequestBody::Empty"),
            RequestBody::Json(bytes) => f.debug_tuple("RequestBody::Json").field(&bytes.len()).finish(),
            RequestBody::File { filename, content } => f
                .debug_struct("RequestBody::File")
                .field("filename", filename)
                .field("len", &content.len())
                .finish(),
        }
    }
}

impl RequestBody {
    pub(crate) fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        let json = serde_json::to_vec(value)?;
        Ok(RequestBody::Json(Bytes::from(json)))
    }

    /// Reads the whole file so it can be sent more than once.
    pub(crate) async fn file<R>(filename: &str, reader: &mut R) -> Result<Self, ClientError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut content = Vec::new();
        reader.read_to_end(&mut content).await?;
        Ok(RequestBody::File {
            filename: filename.to_owned(),
            content: Bytes::from(content),
        })
    }

    /// Attaches the body to one attempt.
    pub(crate) fn apply(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        match self {
            RequestBody::Empty => Ok(builder),
            RequestBody::Json(bytes) => Ok(builder
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(bytes.clone())),
            RequestBody::File { filename, content } => {
                let part = Part::bytes(content.to_vec())
                    .file_name(filename.clone())
                    .mime_str(mime::APPLICATION_OCTET_STREAM.as_ref())
                    .map_err(|e| ClientError::Build(e.to_string()))?;
                Ok(builder.multipart(Form::new().part(FILE_FIELD, part)))
            }
        }
    }
}
