use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::storage::{KeyValueStore, StorageError};
use super::token::{decode_claims, token_from_query, Claims};
use crate::constants::{AUTH_TOKEN_KEY, USER_KEY};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed session token: {0}")]
    MalformedToken(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// An authenticated session as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    /// `None` when the claims blob is missing or unreadable.
    pub claims: Option<Claims>,
}

impl Session {
    /// Email of the signed-in user, taken from the `sub` claim.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.claims.as_ref().and_then(Claims::email)
    }
}

/// Session state: either nobody is signed in, or a token is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(s) => Some(s),
            Self::Anonymous => None,
        }
    }
}

/// Reads and writes the session keys in a [`KeyValueStore`].
///
/// The store is the single source of truth: nothing is cached here, so a
/// logout is visible to every holder of the manager immediately.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current session state.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn state(&self) -> Result<SessionState, SessionError> {
        let Some(token) = self.store.get(AUTH_TOKEN_KEY).await?.filter(|t| !t.is_empty()) else {
            return Ok(SessionState::Anonymous);
        };

        let claims = match self.store.get(USER_KEY).await? {
            Some(blob) => match serde_json::from_str::<Claims>(&blob) {
                Ok(claims) => Some(claims),
                Err(e) => {
                    warn!("Stored user claims are unreadable: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(SessionState::Authenticated(Session { token, claims }))
    }

    /// Current session, if any. Storage errors count as signed out.
    #[must_use]
    pub async fn current(&self) -> Option<Session> {
        match self.state().await {
            Ok(SessionState::Authenticated(session)) => Some(session),
            Ok(SessionState::Anonymous) => None,
            Err(e) => {
                warn!("Failed to read session: {e}");
                None
            }
        }
    }

    #[must_use]
    pub async fn is_authenticated(&self) -> bool {
        self.current().await.is_some()
    }

    /// Store a freshly issued token together with its decoded payload.
    ///
    /// Nothing is written when the token cannot be decoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed or storage fails.
    pub async fn sign_in(&self, token: &str) -> Result<Session, SessionError> {
        let token = token.trim();
        let claims = decode_claims(token)?;
        let blob = serde_json::to_string(&claims)
            .map_err(|e| SessionError::MalformedToken(e.to_string()))?;

        self.store.set(AUTH_TOKEN_KEY, token).await?;
        self.store.set(USER_KEY, &blob).await?;

        info!(email = claims.email().unwrap_or("<none>"), "Signed in");

        Ok(Session {
            token: token.to_string(),
            claims: Some(claims),
        })
    }

    /// Sign in with a `token` query parameter, if the query carries one.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed or storage fails.
    pub async fn accept_query_token(&self, query: &str) -> Result<Option<Session>, SessionError> {
        match token_from_query(query) {
            Some(token) => self.sign_in(&token).await.map(Some),
            None => Ok(None),
        }
    }

    /// Clear both session keys.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.store.remove(AUTH_TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryStore;
    use crate::auth::token::encode_test_token;
    use serde_json::json;

    fn manager() -> (SessionManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SessionManager::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_starts_anonymous() {
        let (sessions, _) = manager();
        assert_eq!(sessions.state().await.unwrap(), SessionState::Anonymous);
        assert!(!sessions.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_sign_in_stores_token_and_claims() {
        let (sessions, store) = manager();
        let token = encode_test_token(&json!({"sub": "dev@example.com"}));

        let session = sessions.sign_in(&token).await.unwrap();
        assert_eq!(session.email(), Some("dev@example.com"));

        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap().as_deref(), Some(token.as_str()));
        let blob = store.get(USER_KEY).await.unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored, json!({"sub": "dev@example.com"}));

        assert!(sessions.state().await.unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_malformed_token_leaves_anonymous() {
        let (sessions, store) = manager();
        assert!(matches!(
            sessions.sign_in("garbage").await,
            Err(SessionError::MalformedToken(_))
        ));
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
        assert!(!sessions.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_sign_out_clears_both_keys() {
        let (sessions, store) = manager();
        let token = encode_test_token(&json!({"sub": "dev@example.com"}));
        sessions.sign_in(&token).await.unwrap();

        sessions.sign_out().await.unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get(USER_KEY).await.unwrap(), None);
        assert_eq!(sessions.state().await.unwrap(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_token_without_claims_blob_is_authenticated_without_email() {
        let (sessions, store) = manager();
        store.set(AUTH_TOKEN_KEY, "opaque").await.unwrap();

        let session = sessions.current().await.unwrap();
        assert_eq!(session.token, "opaque");
        assert_eq!(session.email(), None);
    }

    #[tokio::test]
    async fn test_accept_query_token() {
        let (sessions, _) = manager();
        assert_eq!(sessions.accept_query_token("id=1").await.unwrap(), None);

        let token = encode_test_token(&json!({"sub": "oauth@example.com"}));
        let session = sessions
            .accept_query_token(&format!("token={token}"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.email(), Some("oauth@example.com"));
        assert!(sessions.is_authenticated().await);
    }
}
