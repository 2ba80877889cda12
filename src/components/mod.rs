//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout and navigation
//! - `button`: Button and link-button components
//! - `alert`: Toast notifications and alerts
//! - `form`: Form elements and input components

pub mod alert;
pub mod button;
pub mod form;
pub mod layout;

pub use alert::{message_slot, Alert, AlertVariant, Toast};
pub use button::{Button, ButtonVariant};
pub use form::{Form, FormGroup, Input, Select, SelectOption, TextArea};
pub use layout::BaseLayout;

/// Re-export maud for convenience
pub use maud::{html, Markup, DOCTYPE};
