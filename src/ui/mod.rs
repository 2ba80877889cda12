//! Interaction handler: page state and the events that change it.

pub mod auth;
pub mod board;
pub mod events;
pub mod posts;

pub use auth::{AuthError, AuthFlow};
pub use board::{parse_question_form, QuestionBoard, SheetStatus, QUESTION_FORM_ID};
pub use events::{EventKind, EventTarget, FormData, UiEvent};
pub use posts::{FeedAction, PostFeed, SubmitOutcome, POST_FORM_ID};
