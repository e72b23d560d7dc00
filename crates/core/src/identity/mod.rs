//! Active user identity.
//!
//! The store never looks identity up on its own: callers resolve it through
//! an [`IdentitySource`] once and pass the identifier in at construction.

/// Synchronous lookup of the active user's identifier.
pub trait IdentitySource: Send + Sync {
    /// Returns `None` when no user is signed in.
    fn active_user_id(&self) -> Option<String>;
}

/// Identity fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user_id: Option<String>,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn unset() -> Self {
        Self { user_id: None }
    }
}

impl IdentitySource for StaticIdentity {
    fn active_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// Identity read from an environment variable on every lookup.
#[derive(Debug, Clone)]
pub struct EnvIdentity {
    var_name: String,
}

impl EnvIdentity {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl IdentitySource for EnvIdentity {
    fn active_user_id(&self) -> Option<String> {
        std::env::var(&self.var_name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
