//! Base layout components for the web UI.
//!
//! Provides the HTML skeleton, navigation, and footer shared by every page.

use maud::{html, Markup, DOCTYPE};

use crate::auth::Session;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("My Page", session.as_ref()).render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    session: Option<&'a Session>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout.
    ///
    /// The session is required so that navigation always reflects whether
    /// someone is signed in. Pass `None` for anonymous visitors.
    #[must_use]
    pub fn new(title: &'a str, session: Option<&'a Session>) -> Self {
        Self { title, session }
    }

    /// Render the complete HTML page with the given content.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - Blogify" }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li { a href="/" { strong class="site-logo" { "Blogify" } } }
                    }
                    ul {
                        li { a href="/" { "Home" } }
                        li { a href="/posts" { "Posts" } }
                        li { a href="/dsa" { "DSA Sheet" } }
                        (self.render_auth_nav())
                    }
                }
            }
        }
    }

    fn render_auth_nav(&self) -> Markup {
        match self.session {
            Some(session) => html! {
                @if let Some(email) = session.email() {
                    li class="nav-user" { (email) }
                }
                li {
                    form action="/logout" method="post" class="inline-form" {
                        button type="submit" class="btn outline" { "Logout" }
                    }
                }
            },
            None => html! {
                li { a href="/login" { "Login" } }
                li { a href="/register" { "Sign up" } }
            },
        }
    }

    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small { "Blogify" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;

    fn session(email: &str) -> Session {
        Session {
            token: "t".to_string(),
            claims: Some(Claims {
                sub: Some(email.to_string()),
                extra: serde_json::Map::new(),
            }),
        }
    }

    #[test]
    fn test_anonymous_nav_shows_login() {
        let html = BaseLayout::new("DSA", None).render(html! {}).into_string();
        assert!(html.contains(r#"href="/login""#));
        assert!(!html.contains("/logout"));
        assert!(html.contains("<title>DSA - Blogify</title>"));
    }

    #[test]
    fn test_signed_in_nav_shows_logout_and_email() {
        let s = session("dev@example.com");
        let html = BaseLayout::new("DSA", Some(&s)).render(html! {}).into_string();
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains("dev@example.com"));
        assert!(!html.contains(r#"href="/login""#));
    }
}
