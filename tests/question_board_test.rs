//! Integration tests for the DSA question sheet.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use blogify_client::api::ApiClient;
use blogify_client::auth::{MemoryStore, SessionManager};
use blogify_client::ui::{FormData, QuestionBoard, SheetStatus, UiEvent, QUESTION_FORM_ID};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_with_claims(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}

fn token_for(email: &str) -> String {
    token_with_claims(&json!({ "sub": email }))
}

fn sessions() -> SessionManager {
    SessionManager::new(Arc::new(MemoryStore::new()))
}

fn board_for(server: &MockServer, sessions: &SessionManager) -> QuestionBoard {
    let api = ApiClient::new(&server.uri()).expect("Failed to build client");
    QuestionBoard::new(api, sessions.clone())
}

async fn mount_questions(server: &MockServer, questions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/dsa/loadAllQuestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(questions))
        .mount(server)
        .await;
}

fn single_question() -> serde_json::Value {
    json!([{
        "id": "1",
        "name": "Two Sum",
        "questionLink": ["https://leetcode.com/problems/two-sum"],
        "section": "Arrays",
        "difficulty": "Easy",
        "done": false
    }])
}

#[tokio::test]
async fn test_single_question_renders_one_section() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;

    let sessions = sessions();
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    assert_eq!(board.status(), SheetStatus::Loaded);
    assert_eq!(board.questions().len(), 1);

    let html = board.render(None).into_string();
    assert_eq!(html.matches(r#"class="dsa-section""#).count(), 1);
    assert!(html.contains("Arrays"));
    assert!(html.contains("difficulty-summary easy"));
    assert_eq!(html.matches(r#"class="question-item""#).count(), 1);
    assert!(!html.contains(" checked"));
}

#[tokio::test]
async fn test_toggle_sends_patch_and_stays_checked() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;
    Mock::given(method("PATCH"))
        .and(path("/api/dsa/updateSelection"))
        .and(body_json(json!({
            "email": "dev@example.com",
            "questionToBeAddedOrRemoved": "1",
            "addOrRemove": "Add"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Saved"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dsa/getUserSelections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": []})))
        .mount(&server)
        .await;

    let sessions = sessions();
    sessions
        .sign_in(&token_for("dev@example.com"))
        .await
        .expect("Failed to sign in");
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    assert!(board.handle_event(&UiEvent::question_toggled("1", true)).await);

    assert_eq!(board.is_checked("1"), Some(true));
    assert!(!board.is_loading("1"));
    let toast = board.toast().expect("Expected a toast");
    assert!(!toast.is_error());
    assert_eq!(toast.message, "Saved");
}

#[tokio::test]
async fn test_failed_update_reverts_checkbox() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;
    Mock::given(method("PATCH"))
        .and(path("/api/dsa/updateSelection"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dsa/getUserSelections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": []})))
        .mount(&server)
        .await;

    let sessions = sessions();
    sessions
        .sign_in(&token_for("dev@example.com"))
        .await
        .expect("Failed to sign in");
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    board.handle_checkbox_change("1", true).await;

    assert_eq!(board.is_checked("1"), Some(false));
    assert!(!board.is_loading("1"));
    assert!(board.toast().expect("Expected a toast").is_error());
}

#[tokio::test]
async fn test_toggle_without_session_makes_no_request() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;
    Mock::given(method("PATCH"))
        .and(path("/api/dsa/updateSelection"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sessions = sessions();
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    board.handle_checkbox_change("1", true).await;

    assert_eq!(board.is_checked("1"), Some(false));
    let toast = board.toast().expect("Expected a toast");
    assert!(toast.is_error());
    assert_eq!(toast.message, "Please login first!");
}

#[tokio::test]
async fn test_toggle_without_email_claim_reverts_without_request() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;
    Mock::given(method("GET"))
        .and(path("/api/dsa/getUserSelections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": []})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/dsa/updateSelection"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sessions = sessions();
    let session = sessions
        .sign_in(&token_with_claims(&json!({"role": "USER"})))
        .await
        .expect("Failed to sign in");
    assert_eq!(session.email(), None);
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    board.handle_checkbox_change("1", true).await;

    assert_eq!(board.is_checked("1"), Some(false));
    assert!(!board.is_loading("1"));
    let toast = board.toast().expect("Expected a toast");
    assert!(toast.is_error());
    assert_eq!(toast.message, "Update failed. Please try again.");
}

#[tokio::test]
async fn test_failed_removal_restores_checked_state() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;
    Mock::given(method("GET"))
        .and(path("/api/dsa/getUserSelections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": ["1"]})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/dsa/updateSelection"))
        .and(body_json(json!({
            "email": "dev@example.com",
            "questionToBeAddedOrRemoved": "1",
            "addOrRemove": "Remove"
        })))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let sessions = sessions();
    sessions
        .sign_in(&token_for("dev@example.com"))
        .await
        .expect("Failed to sign in");
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;
    assert_eq!(board.is_checked("1"), Some(true));

    board.handle_checkbox_change("1", false).await;

    assert_eq!(board.is_checked("1"), Some(true));
    assert!(!board.is_loading("1"));
    assert!(board.toast().expect("Expected a toast").is_error());
    assert!(board.render(None).into_string().contains(r#"class="question-name done""#));
}

#[tokio::test]
async fn test_user_progress_checks_exactly_returned_ids() {
    let server = MockServer::start().await;
    mount_questions(
        &server,
        json!([
            {"id": "1", "name": "A", "section": "Arrays", "difficulty": "Easy"},
            {"id": "2", "name": "B", "section": "Arrays", "difficulty": "Medium"},
            {"id": 3, "name": "C", "section": "Graphs", "difficulty": "Hard", "done": true}
        ]),
    )
    .await;
    let token = token_for("dev@example.com");
    let bearer = format!("Bearer {token}");
    Mock::given(method("GET"))
        .and(path("/api/dsa/getUserSelections"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": [" 2 ", 9]})))
        .expect(1)
        .mount(&server)
        .await;

    let sessions = sessions();
    sessions.sign_in(&token).await.expect("Failed to sign in");
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    assert_eq!(board.is_checked("1"), Some(false));
    assert_eq!(board.is_checked("2"), Some(true));
    assert_eq!(board.is_checked("3"), Some(false));
}

#[tokio::test]
async fn test_load_failure_shows_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dsa/loadAllQuestions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sessions = sessions();
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;

    assert_eq!(board.status(), SheetStatus::Failed);
    assert!(board.render(None).into_string().contains("Failed to load questions."));
}

#[tokio::test]
async fn test_add_question_reloads_sheet() {
    let server = MockServer::start().await;
    mount_questions(&server, single_question()).await;
    Mock::given(method("POST"))
        .and(path("/api/dsa/addNewQuestion"))
        .and(body_json(json!({
            "name": "Valid Anagram",
            "questionLink": ["https://a", "https://b"],
            "difficulty": "Easy",
            "section": "Strings"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Added"})))
        .expect(1)
        .mount(&server)
        .await;

    let sessions = sessions();
    let mut board = board_for(&server, &sessions);
    let form = FormData::new()
        .field("name", " Valid Anagram ")
        .field("questionLink", "https://a, https://b")
        .field("difficulty", "Easy")
        .field("section", "Strings");

    assert!(board.handle_event(&UiEvent::submit(QUESTION_FORM_ID, form)).await);

    assert_eq!(board.status(), SheetStatus::Loaded);
    assert_eq!(board.questions().len(), 1);
    assert_eq!(board.toast().expect("Expected a toast").message, "Added");
}

#[tokio::test]
async fn test_section_filter_hides_other_sections() {
    let server = MockServer::start().await;
    mount_questions(
        &server,
        json!([
            {"id": "1", "name": "A", "section": "Arrays", "difficulty": "Easy"},
            {"id": "2", "name": "B", "section": "Graphs", "difficulty": "Hard"}
        ]),
    )
    .await;

    let sessions = sessions();
    let mut board = board_for(&server, &sessions);
    board.load_and_render().await;
    board.set_section_filter("Graphs");

    let html = board.render(None).into_string();
    assert_eq!(html.matches("display: none;").count(), 1);
    assert_eq!(board.section_filter(), "Graphs");
}
