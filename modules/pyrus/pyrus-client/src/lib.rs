//! Async client for the Pyrus task and workflow API.
//!
//! [`PyrusClient`] authenticates lazily, keeps the access token for later
//! calls and re-authenticates once when the server rejects it. Every endpoint
//! is a method of the [`PyrusApi`] trait.
//!
//! ```no_run
//! use pyrus_client::{ClientConfig, PyrusApi, PyrusClient};
//!
//! # async fn run() -> Result<(), pyrus_client::ClientError> {
//! let client = PyrusClient::new(ClientConfig::from_env()?)?;
//! let profile = client.profile().await?;
//! println!("{} {}", profile.first_name, profile.last_name);
//!
//! let (router, mut events) = client.webhook();
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! tokio::spawn(async move { axum::serve(listener, router).await });
//! while let Some(event) = events.recv().await {
//!     println!("task {} changed", event.task_id);
//! }
//! # Ok(())
//! # }
//! ```

mod body;
mod client;
mod config;
mod error;
mod response;
mod token;
mod transport;
mod webhook;

pub use client::{PyrusApi, PyrusClient};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_EVENT_BUFFER_SIZE, DEFAULT_TIMEOUT, USER_AGENT,
};
pub use error::ClientError;
pub use token::TokenStore;
pub use webhook::{
    router as webhook_router, Signature, SignatureError, WebhookVerifier, MAX_EVENT_BYTES,
    SIGNATURE_HEADER,
};

pub use pyrus_sdk;
