//! DSA question sheet state and its event handling.

use std::collections::HashSet;

use maud::{html, Markup, Render};
use tracing::{debug, error, info, warn};

use super::events::{EventKind, FormData, UiEvent};
use crate::api::{ApiClient, ApiError};
use crate::auth::{Session, SessionManager};
use crate::components::{message_slot, BaseLayout, Toast};
use crate::constants::ALL_SECTIONS;
use crate::models::{ApiMessage, Difficulty, NewQuestion, Question};
use crate::render::{
    group_questions, render_load_failed, render_loading, render_question_form,
    render_section_filter, render_sections, ProgressStats, SheetView,
};

/// Form id of the add-question form.
pub const QUESTION_FORM_ID: &str = "questionForm";

const UPDATE_FAILED: &str = "Update failed. Please try again.";
const ADD_FAILED: &str = "Failed to add question.";

/// Where the sheet is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// The rendered question sheet.
///
/// `Question::done` holds the checkbox state shown to the user. It only
/// diverges from the backend while a status update is in flight.
#[derive(Debug)]
pub struct QuestionBoard {
    api: ApiClient,
    sessions: SessionManager,
    questions: Vec<Question>,
    status: SheetStatus,
    loading: HashSet<String>,
    section_filter: String,
    toast: Option<Toast>,
}

impl QuestionBoard {
    #[must_use]
    pub fn new(api: ApiClient, sessions: SessionManager) -> Self {
        Self {
            api,
            sessions,
            questions: Vec::new(),
            status: SheetStatus::Idle,
            loading: HashSet::new(),
            section_filter: ALL_SECTIONS.to_string(),
            toast: None,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub const fn status(&self) -> SheetStatus {
        self.status
    }

    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    #[must_use]
    pub fn section_filter(&self) -> &str {
        &self.section_filter
    }

    /// Checkbox state of a question, if it is on the sheet.
    #[must_use]
    pub fn is_checked(&self, question_id: &str) -> Option<bool> {
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.done)
    }

    #[must_use]
    pub fn is_loading(&self, question_id: &str) -> bool {
        self.loading.contains(question_id)
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::from_questions(&self.questions)
    }

    /// Forget per-visit view state: the message line and the section filter.
    pub fn reset_view(&mut self) {
        self.toast = None;
        self.section_filter = ALL_SECTIONS.to_string();
    }

    /// Dispatch a delegated event. Returns `false` when the target is not ours.
    pub async fn handle_event(&mut self, event: &UiEvent) -> bool {
        let target = &event.target;
        match event.kind {
            EventKind::Change if target.has_class("question-check") => {
                let Some(id) = target.data_value("id") else {
                    warn!("Checkbox change without a question id");
                    return false;
                };
                let id = id.trim().to_string();
                self.handle_checkbox_change(&id, target.checked).await;
                true
            }
            EventKind::Change if target.has_class("filter-section") => {
                self.set_section_filter(target.data_value("value").unwrap_or(ALL_SECTIONS));
                true
            }
            EventKind::Submit if target.data_value("formId") == Some(QUESTION_FORM_ID) => {
                self.handle_form_submit(&event.form).await;
                true
            }
            _ => false,
        }
    }

    /// Fetch every question and rebuild the sheet, then overlay the signed-in
    /// user's progress.
    pub async fn load_and_render(&mut self) {
        self.status = SheetStatus::Loading;
        self.questions.clear();
        self.loading.clear();

        match self.api.fetch_all_questions().await {
            Ok(questions) => {
                debug!(count = questions.len(), "Questions loaded");
                self.questions = questions;
                self.status = SheetStatus::Loaded;
            }
            Err(e) => {
                error!("Fatal error loading questions: {e}");
                self.status = SheetStatus::Failed;
                return;
            }
        }

        if let Some(session) = self.sessions.current().await {
            self.apply_user_progress(&session.token).await;
        }
    }

    /// Set every checkbox to whether the user has the question selected.
    ///
    /// Failures are logged and leave the sheet as it was.
    pub async fn apply_user_progress(&mut self, token: &str) {
        match self.api.fetch_user_selections(token).await {
            Ok(selections) => {
                let selected: HashSet<String> = selections.selected_ids().into_iter().collect();
                for question in &mut self.questions {
                    question.done = selected.contains(question.id.trim());
                }
                debug!(selected = selected.len(), "User progress applied");
            }
            Err(e) => error!("Error syncing user progress: {e}"),
        }
    }

    /// Handle a checkbox the user just switched to `checked`.
    ///
    /// The new state is shown immediately and reverted if the backend does
    /// not acknowledge it.
    pub async fn handle_checkbox_change(&mut self, question_id: &str, checked: bool) {
        let Some(index) = self.questions.iter().position(|q| q.id == question_id) else {
            warn!(question_id, "Checkbox change for unknown question");
            return;
        };

        let previous = std::mem::replace(&mut self.questions[index].done, checked);
        self.loading.insert(question_id.to_string());

        match self.sync_selection(question_id, checked).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Progress updated!".to_string());
                info!(question_id, done = checked, "Progress updated");
                self.toast = Some(Toast::success(message));
            }
            Err(toast) => {
                self.questions[index].done = previous;
                self.toast = Some(toast);
            }
        }

        self.loading.remove(question_id);
    }

    async fn sync_selection(&self, question_id: &str, done: bool) -> Result<ApiMessage, Toast> {
        let Some(session) = self.sessions.current().await else {
            info!(question_id, "Blocked progress update without a session");
            return Err(Toast::error("Please login first!"));
        };
        let Some(email) = session.email() else {
            warn!(question_id, "Session has no email claim");
            return Err(Toast::error(UPDATE_FAILED));
        };

        self.api
            .update_question_status(email, question_id, done)
            .await
            .map_err(|e: ApiError| {
                error!(question_id, "Failed to update progress: {e}");
                Toast::error(UPDATE_FAILED)
            })
    }

    /// Validate the add-question form, post it, and reload on success.
    pub async fn handle_form_submit(&mut self, form: &FormData) {
        let question = match parse_question_form(form) {
            Ok(question) => question,
            Err(reason) => {
                warn!(reason, "Rejected question form");
                self.toast = Some(Toast::error(ADD_FAILED));
                return;
            }
        };

        match self.api.add_new_question(&question).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Question added successfully!".to_string());
                info!(name = %question.name, section = %question.section, "Question added");
                self.toast = Some(Toast::success(message));
                self.load_and_render().await;
            }
            Err(e) => {
                error!("Failed to add question: {e}");
                self.toast = Some(Toast::error(ADD_FAILED));
            }
        }
    }

    /// Show only `section`, or every section for [`ALL_SECTIONS`].
    pub fn set_section_filter(&mut self, section: &str) {
        let section = section.trim();
        self.section_filter = if section.is_empty() {
            ALL_SECTIONS.to_string()
        } else {
            section.to_string()
        };
    }

    /// Render the complete sheet page.
    #[must_use]
    pub fn render(&self, session: Option<&Session>) -> Markup {
        let grouped = group_questions(&self.questions);
        let sheet = match self.status {
            SheetStatus::Idle | SheetStatus::Loading => render_loading(),
            SheetStatus::Failed => render_load_failed(),
            SheetStatus::Loaded => render_sections(
                &grouped,
                SheetView {
                    loading: &self.loading,
                    section_filter: &self.section_filter,
                },
            ),
        };
        let section_names = grouped.section_names();

        let content = html! {
            h1 { "DSA Sheet" }
            (message_slot(self.toast.as_ref()))
            @if self.status == SheetStatus::Loaded {
                (self.stats().render())
                (render_section_filter(&section_names, &self.section_filter))
            }
            (sheet)
            section class="add-question" {
                h2 { "Add a question" }
                (render_question_form())
            }
        };

        BaseLayout::new("DSA Sheet", session).render(content)
    }
}

/// Collect a new question from form fields.
///
/// Name and section are trimmed; the link list is split on commas with
/// blanks dropped.
///
/// # Errors
///
/// Returns a reason when a field is empty or the difficulty is unknown.
pub fn parse_question_form(form: &FormData) -> Result<NewQuestion, &'static str> {
    let name = form.get("name").trim().to_string();
    let section = form.get("section").trim().to_string();
    let question_link: Vec<String> = form
        .get("questionLink")
        .split(',')
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(String::from)
        .collect();
    let difficulty = Difficulty::parse(form.get("difficulty")).ok_or("unknown difficulty")?;

    if name.is_empty() {
        return Err("name is empty");
    }
    if section.is_empty() {
        return Err("section is empty");
    }
    if question_link.is_empty() {
        return Err("no links given");
    }

    Ok(NewQuestion {
        name,
        question_link,
        difficulty,
        section,
    })
}
