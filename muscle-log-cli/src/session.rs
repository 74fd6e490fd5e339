use std::sync::{Arc, RwLock};
use tokio::sync::watch;

/// Whether the process currently holds a usable session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Unauthenticated,
    /// The server rejected the token; the user has to log in again
    Expired,
}

/// Single holder of the bearer token for one signed-in user.
///
/// Built once at startup and shared by the gateway, the date cache and the
/// save transaction. The token is written only by `sign_in`, `sign_out` and
/// `expire`; everything else reads it. Subscribers are told when the state
/// flips so the front-end can send the user back to login.
#[derive(Debug)]
pub struct SessionContext {
    token: RwLock<Option<String>>,
    state: watch::Sender<AuthState>,
}

impl SessionContext {
    pub fn new(token: Option<String>) -> Arc<Self> {
        let token = token.filter(|t| !t.is_empty());
        let initial = if token.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        let (state, _) = watch::channel(initial);

        Arc::new(Self {
            token: RwLock::new(token),
            state,
        })
    }

    /// Current token, if one is held
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: String) {
        self.replace(Some(token));
        self.state.send_replace(AuthState::Authenticated);
    }

    pub fn sign_out(&self) {
        self.replace(None);
        self.state.send_replace(AuthState::Unauthenticated);
    }

    /// Called when the server rejects the token with 401
    pub fn expire(&self) {
        tracing::warn!("Session token rejected by server, clearing it");
        self.replace(None);
        self.state.send_replace(AuthState::Expired);
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn replace(&self, token: Option<String>) {
        let mut guard = match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_unauthenticated() {
        let session = SessionContext::new(Some(String::new()));
        assert!(!session.is_authenticated());
        assert_eq!(*session.subscribe().borrow(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionContext::new(None);
        let rx = session.subscribe();

        session.sign_in("abc".to_string());
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(*rx.borrow(), AuthState::Authenticated);

        session.sign_out();
        assert!(session.token().is_none());
        assert_eq!(*rx.borrow(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_expire_notifies_subscribers() {
        let session = SessionContext::new(Some("abc".to_string()));
        let mut rx = session.subscribe();

        session.expire();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), AuthState::Expired);
        assert!(session.token().is_none());
    }
}
