use std::sync::{Arc, RwLock};

/// Shared holder for the bearer token.
///
/// Clones share the same slot, so a login through one handle is seen by
/// every client built from it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        Self { token: Arc::new(RwLock::new(token)) }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = if token.is_empty() { None } else { Some(token) };
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}
