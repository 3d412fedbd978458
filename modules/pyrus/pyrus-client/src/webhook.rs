use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, FromRequestParts, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use hmac::{Hmac, Mac};
use http::request::Parts;
use http::StatusCode;
use pyrus_sdk::Event;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::error::ClientError;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the hex HMAC-SHA1 of the request body.
pub const SIGNATURE_HEADER: &str = "x-pyrus-sig";

/// Largest event body the router accepts. Events embed the whole task with
/// its comments, which can outgrow axum's 2 MB default.
pub const MAX_EVENT_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing signature")]
    Missing,
    #[error("malformed signature")]
    Malformed,
    #[error("signature mismatch")]
    Mismatch,
}

/// Checks webhook bodies against the bot's security key.
#[derive(Clone)]
pub struct WebhookVerifier {
    mac: HmacSha1,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl WebhookVerifier {
    pub fn new(security_key: &SecretString) -> Result<Self, ClientError> {
        let mac = HmacSha1::new_from_slice(security_key.expose_secret().as_bytes())
            .map_err(|e| ClientError::Config(format!("invalid webhook key: {e}")))?;
        Ok(Self { mac })
    }

    /// Lowercase hex signature of `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Hex case is ignored. The comparison is constant time.
    pub fn verify(&self, body: &[u8], signature: &str) -> Result<(), SignatureError> {
        let expected = hex::decode(signature.trim()).map_err(|_| SignatureError::Malformed)?;
        let mut mac = self.mac.clone();
        mac.update(body);
        mac.verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// Decodes a delivery body. Call [`verify`](Self::verify) first.
    pub fn decode(&self, body: &[u8]) -> Result<Event, ClientError> {
        Ok(serde_json::from_slice(body)?)
    }
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Value of the `X-Pyrus-Sig` header.
pub struct Signature(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Signature {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SIGNATURE_HEADER)
            .ok_or_else(|| rejection(&SignatureError::Missing))?;
        let value = value
            .to_str()
            .map_err(|_| rejection(&SignatureError::Malformed))?;
        Ok(Signature(value.to_owned()))
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn rejection(err: &SignatureError) -> Response {
    error!(error = %err, "webhook rejected");
    error_response(StatusCode::UNAUTHORIZED, "invalid signature")
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct WebhookState {
    verifier: Arc<WebhookVerifier>,
    events: mpsc::Sender<Event>,
}

/// Router answering `POST /` with verified events pushed into a channel of
/// `buffer` capacity.
///
/// A full channel holds the request open until the receiver makes room.
/// Bodies over [`MAX_EVENT_BYTES`] get `413 Payload Too Large`.
pub fn router(verifier: WebhookVerifier, buffer: usize) -> (Router, mpsc::Receiver<Event>) {
    let (events, receiver) = mpsc::channel(buffer.max(1));
    let state = WebhookState {
        verifier: Arc::new(verifier),
        events,
    };
    let router = Router::new()
        .route("/", post(receive_event))
        .layer(DefaultBodyLimit::max(MAX_EVENT_BYTES))
        .with_state(state);
    (router, receiver)
}

async fn receive_event(
    State(state): State<WebhookState>,
    Signature(signature): Signature,
    body: Bytes,
) -> Response {
    if let Err(err) = state.verifier.verify(&body, &signature) {
        return rejection(&err);
    }

    let event = match state.verifier.decode(&body) {
        Ok(event) => event,
        Err(err) => {
            error!(error = %err, "cannot decode webhook event");
            return error_response(StatusCode::BAD_REQUEST, &format!("invalid event: {err}"));
        }
    };

    debug!(task_id = event.task_id, event = %event.event, "webhook event received");
    if state.events.send(event).await.is_err() {
        error!("webhook event receiver dropped");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "event receiver dropped");
    }
    StatusCode::OK.into_response()
}
