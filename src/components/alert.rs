//! Toast and alert components for user-facing messages.

use maud::{html, Markup, Render};

/// Message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Info,
}

impl AlertVariant {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Text colour of the message line.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Error => "red",
            Self::Success | Self::Info => "green",
        }
    }
}

/// A non-blocking notification line, rendered into `#message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub variant: AlertVariant,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn new(variant: AlertVariant, message: impl Into<String>) -> Self {
        Self {
            variant,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertVariant::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertVariant::Error, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertVariant::Info, message)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.variant == AlertVariant::Error
    }
}

impl Render for Toast {
    fn render(&self) -> Markup {
        html! {
            p id="message"
                class=(format!("toast toast-{}", self.variant.as_str()))
                style=(format!("color: {};", self.variant.color()))
            { (self.message) }
        }
    }
}

/// Render the `#message` slot, empty when there is nothing to show.
#[must_use]
pub fn message_slot(toast: Option<&Toast>) -> Markup {
    match toast {
        Some(toast) => toast.render(),
        None => html! { p id="message" {} },
    }
}

/// A block-level alert used on standalone pages.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self {
            variant: AlertVariant::Error,
            message,
        }
    }

    #[must_use]
    pub const fn success(message: &'a str) -> Self {
        Self {
            variant: AlertVariant::Success,
            message,
        }
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            article class=(self.variant.as_str()) { (self.message) }
        }
    }
}
