//! Delegated UI events.
//!
//! A container handler receives every event raised by its descendants and
//! decides what to do from the target's class list and dataset, the way a
//! single listener on a container element would.

use std::collections::BTreeMap;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Change,
    Click,
    Submit,
}

/// The element an event was raised on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub classes: Vec<String>,
    pub dataset: BTreeMap<String, String>,
    /// Checked state after the change, for checkboxes.
    pub checked: bool,
}

impl EventTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    #[must_use]
    pub fn data(mut self, key: &str, value: &str) -> Self {
        self.dataset.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn data_value(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

/// Submitted form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    /// Field value, or the empty string when the field was not sent.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }
}

impl From<BTreeMap<String, String>> for FormData {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }
}

/// A UI event routed to a container handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub kind: EventKind,
    pub target: EventTarget,
    pub form: FormData,
}

impl UiEvent {
    #[must_use]
    pub fn change(target: EventTarget) -> Self {
        Self {
            kind: EventKind::Change,
            target,
            form: FormData::new(),
        }
    }

    #[must_use]
    pub fn click(target: EventTarget) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            form: FormData::new(),
        }
    }

    /// A submit raised on the form carrying `form_id`.
    #[must_use]
    pub fn submit(form_id: &str, form: FormData) -> Self {
        Self {
            kind: EventKind::Submit,
            target: EventTarget::new().data("formId", form_id),
            form,
        }
    }

    /// A checkbox toggle on a question row.
    #[must_use]
    pub fn question_toggled(question_id: &str, checked: bool) -> Self {
        Self::change(
            EventTarget::new()
                .class("question-check")
                .data("id", question_id)
                .checked(checked),
        )
    }

    /// A click on a post card.
    #[must_use]
    pub fn post_clicked(post_id: &str) -> Self {
        Self::click(EventTarget::new().class("newPost").data("id", post_id))
    }
}
