//! Login, sign-up, and logout.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};

use super::events::FormData;
use crate::api::{ApiClient, ApiError};
use crate::auth::{Session, SessionError, SessionManager};
use crate::models::{Credentials, Registration};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("login response did not include a token")]
    MissingToken,
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Message safe to show on the page.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Invalid(reason) => *reason,
            Self::Api(e)
                if matches!(
                    e.status(),
                    Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
                ) =>
            {
                "Invalid email or password."
            }
            Self::Api(e) if e.is_status() => "The server rejected the request.",
            Self::Api(_) | Self::MissingToken | Self::Session(_) => {
                "Something went wrong. Please try again."
            }
        }
    }
}

/// Account actions against the backend, persisting the session locally.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    api: ApiClient,
    sessions: SessionManager,
}

impl AuthFlow {
    #[must_use]
    pub fn new(api: ApiClient, sessions: SessionManager) -> Self {
        Self { api, sessions }
    }

    /// Log in with the submitted email and password.
    ///
    /// On success the token and its decoded claims are stored.
    ///
    /// # Errors
    ///
    /// Fails on blank fields, a backend error, a response without a token,
    /// or a token that cannot be decoded.
    pub async fn login(&self, form: &FormData) -> Result<Session, AuthError> {
        let email = form.get("email").trim();
        let password = form.get("password");
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Invalid("Email and password are required."));
        }

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.api.login(&credentials).await.map_err(|e| {
            warn!(email, "Login failed: {e}");
            e
        })?;

        let token = response.token().ok_or(AuthError::MissingToken)?;

        let session = self.sessions.sign_in(token).await.map_err(|e| {
            error!("Could not store login session: {e}");
            e
        })?;
        info!(email, "Logged in");
        Ok(session)
    }

    /// Register a new account. Returns the backend's message, if any.
    ///
    /// # Errors
    ///
    /// Fails on blank fields or a backend error.
    pub async fn register(&self, form: &FormData) -> Result<Option<String>, AuthError> {
        let registration = Registration {
            name: form.get("name").trim().to_string(),
            email: form.get("email").trim().to_string(),
            password: form.get("password").to_string(),
        };
        if registration.name.is_empty()
            || registration.email.is_empty()
            || registration.password.is_empty()
        {
            return Err(AuthError::Invalid("Name, email and password are required."));
        }

        let ack = self.api.register_user(&registration).await.map_err(|e| {
            warn!(email = %registration.email, "Registration failed: {e}");
            e
        })?;
        info!(email = %registration.email, "Registered");
        Ok(ack.message)
    }

    /// Accept a token delivered in a query string after the OAuth redirect.
    ///
    /// # Errors
    ///
    /// Fails if the token is malformed or cannot be stored.
    pub async fn accept_redirect(&self, query: &str) -> Result<Option<Session>, SessionError> {
        self.sessions.accept_query_token(query).await
    }

    /// Clear the stored session.
    ///
    /// # Errors
    ///
    /// Fails if storage cannot be written.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.sessions.sign_out().await
    }

    /// Where to send the browser for Google sign-in.
    #[must_use]
    pub fn google_login_url(&self) -> String {
        self.api.google_login_url()
    }
}
