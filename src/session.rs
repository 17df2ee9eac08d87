use parking_lot::RwLock;
use tracing::info;

/// An opaque bearer token obtained from the login endpoint. The client never
/// inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Process-wide credential state. At most one credential is live at a time:
/// it is created by a successful login (or registration) and destroyed by an
/// explicit logout or the first unauthorized response from any endpoint.
///
/// The guard is an explicit, injectable object rather than an ambient global;
/// every component that needs the credential receives an `Arc<SessionGuard>`.
#[derive(Debug, Default)]
pub struct SessionGuard {
    credential: RwLock<Option<Credential>>,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Credential> {
        self.credential.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.read().is_some()
    }

    pub fn set(&self, credential: Credential) {
        *self.credential.write() = Some(credential);
    }

    /// Drops the live credential. Idempotent: components that detect an
    /// unauthorized response call this unconditionally, and only the first
    /// call actually tears the session down.
    pub fn clear(&self) {
        let mut slot = self.credential.write();
        if slot.take().is_some() {
            info!("session credential cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_credential() {
        let guard = SessionGuard::new();
        assert!(guard.current().is_none());
        assert!(!guard.is_authenticated());
    }

    #[test]
    fn set_then_clear_round_trip() {
        let guard = SessionGuard::new();
        guard.set(Credential::new("tok-123"));
        assert_eq!(guard.current().map(|c| c.as_str().to_string()), Some("tok-123".into()));
        assert!(guard.is_authenticated());

        guard.clear();
        assert!(guard.current().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let guard = SessionGuard::new();
        guard.set(Credential::new("tok"));
        guard.clear();
        guard.clear();
        assert!(guard.current().is_none());
    }

    #[test]
    fn set_replaces_previous_credential() {
        let guard = SessionGuard::new();
        guard.set(Credential::new("old"));
        guard.set(Credential::new("new"));
        assert_eq!(guard.current(), Some(Credential::new("new")));
    }
}
