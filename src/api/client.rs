use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::constants::CLIENT_USER_AGENT;
use crate::models::{
    ApiMessage, Credentials, LoginResponse, NewPost, NewQuestion, Post, Question, Registration,
    SelectionAction, SelectionUpdate,
};

/// Typed client for the Blogify REST backend.
///
/// Every operation issues exactly one request and either returns the parsed
/// JSON body or fails with an [`ApiError`]. There are no retries and no
/// request timeouts.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (scheme, host, port).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(CLIENT_USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn dsa_url(&self, endpoint: &str) -> String {
        format!("{}/api/dsa/{endpoint}", self.base_url)
    }

    /// Fetch every question.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn fetch_all_questions(&self) -> Result<Vec<Question>, ApiError> {
        let request = self.client.get(self.dsa_url("loadAllQuestions"));
        send_json(request, "loadAllQuestions").await
    }

    /// Mark a question done (`Add`) or not done (`Remove`) for a user.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn update_question_status(
        &self,
        email: &str,
        question_id: &str,
        done: bool,
    ) -> Result<ApiMessage, ApiError> {
        let body = SelectionUpdate {
            email: email.to_string(),
            question_to_be_added_or_removed: question_id.to_string(),
            add_or_remove: SelectionAction::from_done(done),
        };
        let request = self
            .client
            .patch(self.dsa_url("updateSelection"))
            .json(&body);
        send_json(request, "updateSelection").await
    }

    /// Add a question to the shared list.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn add_new_question(&self, question: &NewQuestion) -> Result<ApiMessage, ApiError> {
        let request = self
            .client
            .post(self.dsa_url("addNewQuestion"))
            .json(question);
        send_json(request, "addNewQuestion").await
    }

    /// Fetch the ids of questions the token's user has marked done.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn fetch_user_selections(&self, token: &str) -> Result<ApiMessage, ApiError> {
        let request = self
            .client
            .get(self.dsa_url("getUserSelections"))
            .bearer_auth(token);
        send_json(request, "getUserSelections").await
    }

    /// Fetch every blog post.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn fetch_all_posts(&self) -> Result<Vec<Post>, ApiError> {
        let request = self
            .client
            .get(format!("{}/api/posts/getAllPosts", self.base_url));
        send_json(request, "getAllPosts").await
    }

    /// Create a blog post. Returns the backend's JSON verbatim.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn create_post(&self, post: &NewPost) -> Result<serde_json::Value, ApiError> {
        let request = self
            .client
            .post(format!("{}/api/posts/createPost", self.base_url))
            .json(post);
        send_json(request, "createPost").await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self
            .client
            .post(format!("{}/api/account/login", self.base_url))
            .json(credentials);
        send_json(request, "login").await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status, or an unparseable body.
    pub async fn register_user(&self, registration: &Registration) -> Result<ApiMessage, ApiError> {
        let request = self
            .client
            .post(format!("{}/api/account/registerUser", self.base_url))
            .json(registration);
        send_json(request, "registerUser").await
    }

    /// Where the browser is sent to start Google sign-in.
    #[must_use]
    pub fn google_login_url(&self) -> String {
        format!("{}/oauth2/authorization/google", self.base_url)
    }
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    endpoint: &'static str,
) -> Result<T, ApiError> {
    debug!(endpoint, "Sending backend request");

    let response = request
        .send()
        .await
        .map_err(|source| ApiError::Network { endpoint, source })?;

    let response = check_status(response, endpoint).await?;

    response
        .json::<T>()
        .await
        .map_err(|source| ApiError::Parse { endpoint, source })
}

async fn check_status(response: Response, endpoint: &'static str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(endpoint, status = %status, message = %message, "Backend returned error status");

    Err(ApiError::Status {
        endpoint,
        status,
        message,
    })
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty());

    from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "request failed".to_string()
        } else {
            trimmed.to_string()
        }
    })
}
