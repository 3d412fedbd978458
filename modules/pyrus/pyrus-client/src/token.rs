use std::fmt;

use parking_lot::RwLock;

/// The bearer token shared by all calls of one client.
///
/// Starts empty, is set by the first authentication and replaced whenever the
/// server rejects it. The lock is never held across an `.await`.
#[derive(Default)]
pub struct TokenStore {
    token: RwLock<String>,
}

impl TokenStore {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            token: RwLock::new(initial.unwrap_or_default()),
        }
    }

    /// Current token, `None` until one has been stored.
    pub fn read(&self) -> Option<String> {
        let token = self.token.read();
        (!token.is_empty()).then(|| token.clone())
    }

    pub fn write(&self, token: String) {
        *self.token.write() = token;
    }

    pub fn is_empty(&self) -> bool {
        self.token.read().is_empty()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_empty() { "<empty>" } else { "[REDACTED]" };
        f.debug_struct("TokenStore").field("token", &state).finish()
    }
}
