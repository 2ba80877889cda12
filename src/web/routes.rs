use std::collections::BTreeMap;

use axum::extract::{Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::AppState;
use crate::auth::Session;
use crate::constants::ALL_SECTIONS;
use crate::render::pages::{
    render_login_page, render_post_not_found, render_post_page, render_register_page,
};
use crate::ui::{EventTarget, FeedAction, FormData, UiEvent, POST_FORM_ID, QUESTION_FORM_ID};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/posts", get(load_posts).post(submit_post))
        .route("/posts/open", get(open_post))
        .route("/post-detail.html", get(post_detail))
        .route("/dsa", get(dsa_sheet))
        .route("/dsa/toggle", post(toggle_question))
        .route("/dsa/questions", post(add_question))
        .route("/dsa/filter", get(filter_sections))
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", post(logout))
        .route("/oauth/google", get(google_login))
        .route("/healthz", get(health))
}

/// Establish a session from `?token=` if present, then return the current one.
async fn session_from_query(state: &AppState, query: Option<&str>) -> Option<Session> {
    if let Some(query) = query {
        match state.auth.accept_redirect(query).await {
            Ok(Some(_)) => info!("Session established from redirect token"),
            Ok(None) => {}
            Err(e) => warn!("Ignoring token from query string: {e}"),
        }
    }
    state.sessions.current().await
}

// ========== Posts ==========

async fn home(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let session = session_from_query(&state, query.as_deref()).await;
    let mut feed = state.feed.lock().await;
    feed.clear_toast();
    Html(feed.render(session.as_ref()).into_string()).into_response()
}

async fn load_posts(State(state): State<AppState>) -> Response {
    let session = state.sessions.current().await;
    let mut feed = state.feed.lock().await;
    feed.clear_toast();
    feed.load_posts().await;
    Html(feed.render(session.as_ref()).into_string()).into_response()
}

async fn submit_post(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
    let session = state.sessions.current().await;
    let event = UiEvent::submit(POST_FORM_ID, FormData::from(fields));

    let mut feed = state.feed.lock().await;
    feed.clear_toast();
    if let Some(FeedAction::Submitted(outcome)) = feed.handle_event(&event).await {
        info!(?outcome, "Post form handled");
    }
    Html(feed.render(session.as_ref()).into_string()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct PostDetailParams {
    id: Option<String>,
}

async fn open_post(
    State(state): State<AppState>,
    Query(params): Query<PostDetailParams>,
) -> Response {
    let Some(post_id) = params.id.filter(|id| !id.trim().is_empty()) else {
        return Redirect::to("/").into_response();
    };

    let mut feed = state.feed.lock().await;
    match feed.handle_event(&UiEvent::post_clicked(&post_id)).await {
        Some(FeedAction::Navigate(url)) => Redirect::to(&format!("/{url}")).into_response(),
        _ => Redirect::to("/").into_response(),
    }
}

async fn post_detail(
    State(state): State<AppState>,
    Query(params): Query<PostDetailParams>,
) -> Response {
    let session = state.sessions.current().await;
    let Some(post_id) = params.id.filter(|id| !id.trim().is_empty()) else {
        return (
            StatusCode::NOT_FOUND,
            Html(render_post_not_found(session.as_ref()).into_string()),
        )
            .into_response();
    };

    let mut feed = state.feed.lock().await;
    if feed.find(&post_id).is_none() && feed.posts().is_empty() {
        feed.load_posts().await;
    }

    match feed.find(&post_id) {
        Some(post) => Html(render_post_page(session.as_ref(), post).into_string()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(render_post_not_found(session.as_ref()).into_string()),
        )
            .into_response(),
    }
}

// ========== DSA sheet ==========

async fn dsa_sheet(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let session = session_from_query(&state, query.as_deref()).await;
    let mut board = state.board.lock().await;
    board.reset_view();
    board.load_and_render().await;
    Html(board.render(session.as_ref()).into_string()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    id: String,
    done: bool,
}

async fn toggle_question(State(state): State<AppState>, Form(form): Form<ToggleForm>) -> Response {
    let event = UiEvent::question_toggled(&form.id, form.done);

    let mut board = state.board.lock().await;
    if !board.handle_event(&event).await {
        warn!(question_id = %form.id, "Toggle was not handled");
    }
    let session = state.sessions.current().await;
    Html(board.render(session.as_ref()).into_string()).into_response()
}

async fn add_question(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
    let event = UiEvent::submit(QUESTION_FORM_ID, FormData::from(fields));

    let mut board = state.board.lock().await;
    board.handle_event(&event).await;
    let session = state.sessions.current().await;
    Html(board.render(session.as_ref()).into_string()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    section: Option<String>,
}

async fn filter_sections(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Response {
    let section = params.section.unwrap_or_else(|| ALL_SECTIONS.to_string());
    let event = UiEvent::change(
        EventTarget::new()
            .class("filter-section")
            .data("value", &section),
    );

    let mut board = state.board.lock().await;
    board.handle_event(&event).await;
    let session = state.sessions.current().await;
    Html(board.render(session.as_ref()).into_string()).into_response()
}

// ========== Accounts ==========

async fn login_form() -> Html<String> {
    Html(render_login_page(None, None).into_string())
}

async fn login(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
    match state.auth.login(&FormData::from(fields)).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            warn!("Login rejected: {e}");
            (
                StatusCode::UNAUTHORIZED,
                Html(render_login_page(Some(e.user_message()), None).into_string()),
            )
                .into_response()
        }
    }
}

async fn register_form() -> Html<String> {
    Html(render_register_page(None).into_string())
}

async fn register(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
    match state.auth.register(&FormData::from(fields)).await {
        Ok(message) => {
            let notice = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Account created. Please log in.".to_string());
            Html(render_login_page(None, Some(&notice)).into_string()).into_response()
        }
        Err(e) => {
            warn!("Registration rejected: {e}");
            (
                StatusCode::BAD_REQUEST,
                Html(render_register_page(Some(e.user_message())).into_string()),
            )
                .into_response()
        }
    }
}

async fn logout(State(state): State<AppState>) -> Response {
    if let Err(e) = state.auth.logout().await {
        error!("Failed to clear session: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to log out").into_response();
    }
    info!("Logged out");
    Redirect::to("/login").into_response()
}

async fn google_login(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.auth.google_login_url())
}

async fn health() -> &'static str {
    "OK"
}
