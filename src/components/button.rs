//! Button component for the web UI.
//!
//! Renders as a `<button>`, or as an `<a>` when an href is set.

use maud::{html, Markup, Render};

/// Button style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
}

impl ButtonVariant {
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Outline => "btn outline",
        }
    }
}

/// A configurable button.
///
/// # Example
///
/// ```ignore
/// use crate::components::button::Button;
///
/// let submit = Button::primary("Add question").r#type("submit");
/// let google = Button::outline("Sign in with Google").href("/oauth/google");
/// ```
#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    pub href: Option<&'a str>,
    pub r#type: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> Button<'a> {
    #[must_use]
    pub const fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            href: None,
            r#type: None,
            id: None,
        }
    }

    #[must_use]
    pub const fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub const fn outline(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Outline)
    }

    /// Render as a link to `href`.
    #[must_use]
    pub const fn href(mut self, href: &'a str) -> Self {
        self.href = Some(href);
        self
    }

    /// Set the button type ("submit", "button", "reset").
    #[must_use]
    pub const fn r#type(mut self, button_type: &'a str) -> Self {
        self.r#type = Some(button_type);
        self
    }

    #[must_use]
    pub const fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let class = self.variant.class();

        if let Some(href) = self.href {
            html! {
                a class=(class) href=(href) id=[self.id] { (self.label) }
            }
        } else {
            html! {
                button class=(class) type=(self.r#type.unwrap_or("button")) id=[self.id] {
                    (self.label)
                }
            }
        }
    }
}
