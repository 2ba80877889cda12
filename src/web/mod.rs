mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::ApiClient;
use crate::auth::{FileStore, SessionManager};
use crate::config::Config;
use crate::ui::{AuthFlow, PostFeed, QuestionBoard};

/// Shared application state.
///
/// Each page's view state sits behind its own async mutex, so events for a
/// page are handled one at a time.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionManager,
    pub auth: AuthFlow,
    pub board: Arc<Mutex<QuestionBoard>>,
    pub feed: Arc<Mutex<PostFeed>>,
}

impl AppState {
    /// Wire the page state to `api` and `sessions`.
    #[must_use]
    pub fn new(config: Config, api: ApiClient, sessions: SessionManager) -> Self {
        Self {
            config: Arc::new(config),
            auth: AuthFlow::new(api.clone(), sessions.clone()),
            board: Arc::new(Mutex::new(QuestionBoard::new(api.clone(), sessions.clone()))),
            feed: Arc::new(Mutex::new(PostFeed::new(api))),
            sessions,
        }
    }
}

/// Start the web server and run until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the server fails
/// to bind.
pub async fn serve(
    config: Config,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.web_host, config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let api = ApiClient::new(&config.backend_url).context("Failed to build HTTP client")?;
    let store = FileStore::new(config.session_path.clone());
    let sessions = SessionManager::new(Arc::new(store));

    let app = create_app(AppState::new(config, api, sessions));

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server error")?;

    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    info!(static_dir = %static_dir.display(), "Serving static files");

    Router::new()
        .merge(routes::router())
        .nest_service("/static", ServeDir::new(&static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
