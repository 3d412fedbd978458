use std::time::Duration;

use secrecy::SecretString;

use crate::error::ClientError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.pyrus.com/v4";
/// Capacity of the webhook event channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;
/// Request timeout of the HTTP client built by [`PyrusClient::new`](crate::PyrusClient::new).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Sent with every request.
pub const USER_AGENT: &str = concat!("Pyrus API rust client v", env!("CARGO_PKG_VERSION"));

/// Configuration for [`PyrusClient`](crate::PyrusClient)
#[derive(Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub login: String,
    pub security_key: SecretString,
    /// Only applies when the client builds its own `reqwest::Client`.
    pub timeout: Duration,
    /// Caller-supplied HTTP client. Its timeouts and connection settings are
    /// used as is.
    pub http_client: Option<reqwest::Client>,
    pub event_buffer_size: usize,
    /// Token to start with instead of authenticating on the first call.
    pub access_token: Option<SecretString>,
}

impl ClientConfig {
    /// Create configuration for the given bot or user credentials
    pub fn new(login: impl Into<String>, security_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            login: login.into(),
            security_key: secret(security_key.into()),
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            access_token: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Values below 1 are raised to 1.
    pub fn with_event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = size.max(1);
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(secret(token.into()));
        self
    }

    /// Create configuration from environment variables
    ///
    /// Expects:
    /// - `PYRUS_LOGIN`: bot or user login (required)
    /// - `PYRUS_SECURITY_KEY`: security key (required)
    /// - `PYRUS_BASE_URL`: API root (default: "https://api.pyrus.com/v4")
    /// - `PYRUS_EVENT_BUFFER_SIZE`: webhook channel capacity (default: 100)
    pub fn from_env() -> Result<Self, ClientError> {
        let login = std::env::var("PYRUS_LOGIN")
            .map_err(|_| ClientError::Config("PYRUS_LOGIN not set".into()))?;
        let security_key = std::env::var("PYRUS_SECURITY_KEY")
            .map_err(|_| ClientError::Config("PYRUS_SECURITY_KEY not set".into()))?;

        let mut config = Self::new(login, security_key);
        if let Ok(base_url) = std::env::var("PYRUS_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(size) = std::env::var("PYRUS_EVENT_BUFFER_SIZE") {
            let size = size.parse::<usize>().map_err(|e| {
                ClientError::Config(format!("PYRUS_EVENT_BUFFER_SIZE is not a number: {e}"))
            })?;
            config = config.with_event_buffer_size(size);
        }
        Ok(config)
    }
}

pub(crate) fn secret(value: String) -> SecretString {
    SecretString::new(value.into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("bot@example.com", "key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.event_buffer_size, 100);
        assert!(config.http_client.is_none());
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("bot@example.com", "key")
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5))
            .with_event_buffer_size(0)
            .with_access_token("cached");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.event_buffer_size, 1);
        assert_eq!(config.access_token.unwrap().expose_secret(), "cached");
    }

    #[test]
    fn test_security_key_is_redacted() {
        let config = ClientConfig::new("bot@example.com", "very-secret-key");
        assert!(!format!("{config:?}").contains("very-secret-key"));
    }
}
