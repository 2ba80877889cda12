//! Blog post rendering.

use chrono::{DateTime, NaiveDateTime};
use maud::{html, Markup, Render};

use crate::components::{Button, Form, FormGroup, Input, TextArea};
use crate::models::Post;

/// Navigation target for a clicked post.
#[must_use]
pub fn post_detail_url(post_id: &str) -> String {
    format!("post-detail.html?id={}", urlencoding::encode(post_id))
}

/// Format a `createdAt` timestamp as a long date, e.g. `1 January 2024, 12:00 pm`.
///
/// Timestamps with an offset are shown in that offset. Unparseable values
/// are returned unchanged.
#[must_use]
pub fn format_created_at(raw: &str) -> String {
    const FORMAT: &str = "%-d %B %Y, %I:%M %P";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(FORMAT).to_string();
        }
    }
    raw.to_string()
}

/// Render a single post card.
#[must_use]
pub fn render_post(post: &Post) -> Markup {
    let created = post
        .created_at
        .as_deref()
        .map(format_created_at)
        .unwrap_or_default();

    html! {
        div class="newPost" data-id=(post.id) {
            h2 class="postTitle" {
                a href=(format!("/posts/open?id={}", urlencoding::encode(&post.id))) { (post.title) }
            }
            p class="postContent" { (post.content) }
            p class="postAuthor" { "Author: " (post.author) }
            p class="postStatus" { "Status: " (post.status.as_deref().unwrap_or("")) }
            p class="postCreatedAt" { "Created At: " (created) }
        }
    }
}

/// Render the `.loadAllPostsContainer` list in the order received.
#[must_use]
pub fn render_posts(posts: &[Post]) -> Markup {
    html! {
        div class="loadAllPostsContainer" {
            @for post in posts {
                (render_post(post))
            }
        }
    }
}

/// Post composer. `content` is the unsent draft, kept after a failed submit.
#[must_use]
pub fn render_post_composer(content: &str) -> Markup {
    Form::post(
        "/posts",
        html! {
            (FormGroup::new(
                "Write something",
                "content",
                TextArea::new("content").id("content").rows(6).value(content).render(),
            ))
            (FormGroup::new("Title", "title", Input::text("title").id("title").render()))
            (FormGroup::new("Author Name", "author", Input::text("author").id("author").render()))
            (Button::primary("Publish").r#type("submit").id("submitButton"))
        },
    )
    .id("postForm")
    .render()
}

/// Full post view for the detail page.
#[must_use]
pub fn render_post_detail(post: &Post) -> Markup {
    html! {
        article class="post-detail" data-id=(post.id) {
            h1 class="postTitle" { (post.title) }
            p class="postAuthor" { "Author: " (post.author) }
            @if let Some(created) = post.created_at.as_deref() {
                p class="postCreatedAt" { "Created At: " (format_created_at(created)) }
            }
            div class="postContent" { (post.content) }
        }
    }
}
