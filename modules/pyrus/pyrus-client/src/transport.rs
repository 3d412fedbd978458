use http::header;
use http::{Method, StatusCode};
use pyrus_sdk::requests::AuthRequest;
use pyrus_sdk::AuthResponse;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWrite;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::body::RequestBody;
use crate::config::{ClientConfig, USER_AGENT};
use crate::error::ClientError;
use crate::response::{read_payload, Payload, ResponseSink};
use crate::token::TokenStore;

pub(crate) const AUTH_PATH: &str = "/auth";

/// Sends requests to the Pyrus API and manages the access token.
///
/// A call without a token authenticates first. A call answered with 401 is
/// retried once after re-authenticating; a second 401 is returned to the
/// caller as is. There is no other retry.
pub(crate) struct Transport {
    base_url: String,
    login: String,
    security_key: SecretString,
    http_client: reqwest::Client,
    tokens: TokenStore,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("login", &self.login)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Url::parse(&config.base_url).map_err(|e| {
            ClientError::Config(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let http_client = match config.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| ClientError::Build(e.to_string()))?,
        };
        let initial_token = config
            .access_token
            .map(|token| token.expose_secret().to_owned());

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            login: config.login,
            security_key: config.security_key,
            http_client,
            tokens: TokenStore::new(initial_token),
        })
    }

    pub(crate) fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ClientError::Build(format!("invalid request URL for '{path}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        body: &RequestBody,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let builder = body.apply(builder)?;

        builder.send().await.map_err(|e| {
            error!(url = %url, error = %e, "request failed");
            if e.is_timeout() {
                ClientError::Timeout(e.to_string())
            } else if e.is_connect() {
                ClientError::Connection(e.to_string())
            } else {
                ClientError::Http(e)
            }
        })
    }

    /// Exchanges credentials for an access token. Never attaches a token and
    /// never retries.
    #[instrument(skip_all)]
    pub(crate) async fn authenticate(
        &self,
        login: &str,
        security_key: &str,
    ) -> Result<String, ClientError> {
        let url = self.url(AUTH_PATH, &[])?;
        let body = RequestBody::json(&AuthRequest {
            login,
            security_key,
        })?;

        let response = self.send(&Method::POST, &url, &body, None).await?;
        let payload = read_payload(response, ResponseSink::Json)
            .await
            .inspect_err(|e| error!(error = %e, "authentication failed"))?;
        let auth: AuthResponse = decode_json(payload)?;
        Ok(auth.access_token)
    }

    /// Authenticates with the configured credentials and stores the new token.
    async fn refresh_token(&self) -> Result<String, ClientError> {
        let token = self
            .authenticate(&self.login, self.security_key.expose_secret())
            .await?;
        self.tokens.write(token.clone());
        debug!("access token refreshed");
        Ok(token)
    }

    /// Runs one logical call.
    #[instrument(skip(self, query, body, sink))]
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: &RequestBody,
        sink: ResponseSink<'_>,
    ) -> Result<Payload, ClientError> {
        let url = self.url(path, query)?;

        let mut token = match self.tokens.read() {
            Some(token) => token,
            None => {
                debug!("no access token yet");
                self.refresh_token().await?
            }
        };

        let mut retries_left = 1u8;
        let response = loop {
            let response = self.send(&method, &url, body, Some(&token)).await?;
            if response.status() != StatusCode::UNAUTHORIZED || retries_left == 0 {
                break response;
            }
            retries_left -= 1;
            warn!("access token rejected, re-authenticating");
            token = self.refresh_token().await?;
        };

        if matches!(sink, ResponseSink::Discard) {
            debug!(status = %response.status(), "response discarded");
            return Ok(Payload::None);
        }
        read_payload(response, sink).await
    }

    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<T, ClientError> {
        let payload = self
            .execute(method, path, query, &body, ResponseSink::Json)
            .await?;
        decode_json(payload)
    }

    pub(crate) async fn request_discard(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<(), ClientError> {
        self.execute(method, path, &[], &body, ResponseSink::Discard)
            .await
            .map(|_| ())
    }

    /// Streams a file response into `writer` and returns its name.
    pub(crate) async fn download(
        &self,
        path: &str,
        writer: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<String, ClientError> {
        let payload = self
            .execute(
                Method::GET,
                path,
                &[],
                &RequestBody::Empty,
                ResponseSink::File(writer),
            )
            .await?;
        match payload {
            Payload::File { filename } => Ok(filename),
            Payload::Json(_) | Payload::None => Err(ClientError::unexpected("attachment expected")),
        }
    }
}

fn decode_json<T: DeserializeOwned>(payload: Payload) -> Result<T, ClientError> {
    match payload {
        Payload::Json(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Payload::File { .. } => Err(ClientError::unexpected("writer expected")),
        Payload::None => Err(ClientError::unexpected("empty response")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> Transport {
        Transport::new(ClientConfig::new("bot@example.com", "key").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = transport("https://api.example.com/v4/");
        let url = transport.url("/forms/12", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v4/forms/12");
    }

    #[test]
    fn test_url_encodes_query() {
        let transport = transport("https://api.example.com/v4");
        let url = transport
            .url(
                "/lists/3/tasks",
                &[("item_count", "50".to_owned()), ("q", "a b&c".to_owned())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v4/lists/3/tasks?item_count=50&q=a+b%26c"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = Transport::new(ClientConfig::new("bot", "key").with_base_url("not a url"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_initial_token_is_used() {
        let transport = Transport::new(
            ClientConfig::new("bot", "key").with_access_token("cached"),
        )
        .unwrap();
        assert_eq!(transport.tokens().read().as_deref(), Some("cached"));
    }
}
