//! Blog post feed state and its event handling.

use maud::Markup;
use tracing::{error, info};

use super::events::{EventKind, FormData, UiEvent};
use crate::api::ApiClient;
use crate::auth::Session;
use crate::components::Toast;
use crate::models::{NewPost, Post};
use crate::render::pages::render_home_page;
use crate::render::post_detail_url;

/// Form id of the post composer.
pub const POST_FORM_ID: &str = "postForm";

/// Result of a composer submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent: content, title, or author was blank.
    Skipped,
    Created,
    Failed,
}

/// What the page should do after a feed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    Submitted(SubmitOutcome),
    Navigate(String),
}

/// The loaded post list plus the composer draft.
#[derive(Debug)]
pub struct PostFeed {
    api: ApiClient,
    posts: Vec<Post>,
    draft: String,
    toast: Option<Toast>,
}

impl PostFeed {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            posts: Vec::new(),
            draft: String::new(),
            toast: None,
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }

    #[must_use]
    pub fn find(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    /// Dispatch a delegated event. Returns `None` when the target is not ours.
    pub async fn handle_event(&mut self, event: &UiEvent) -> Option<FeedAction> {
        let target = &event.target;
        match event.kind {
            EventKind::Click if target.has_class("newPost") => {
                let post_id = target.data_value("id")?;
                info!(post_id, "Post clicked");
                Some(FeedAction::Navigate(post_detail_url(post_id)))
            }
            EventKind::Submit if target.data_value("formId") == Some(POST_FORM_ID) => {
                let outcome = self.submit_post(&event.form).await;
                Some(FeedAction::Submitted(outcome))
            }
            _ => None,
        }
    }

    /// Replace the list with the backend's posts.
    ///
    /// An empty response or a failure leaves the current list in place.
    pub async fn load_posts(&mut self) {
        match self.api.fetch_all_posts().await {
            Ok(posts) if posts.is_empty() => info!("No posts found"),
            Ok(posts) => {
                info!(count = posts.len(), "Posts found");
                self.posts = posts;
            }
            Err(e) => {
                error!("Failed to fetch posts: {e}");
                self.toast = Some(Toast::error("Failed to load posts."));
            }
        }
    }

    /// Publish the composer content.
    ///
    /// Blank content sends nothing. Title and author are required as well.
    pub async fn submit_post(&mut self, form: &FormData) -> SubmitOutcome {
        let content = form.get("content");
        if content.trim().is_empty() {
            return SubmitOutcome::Skipped;
        }

        let title = form.get("title").trim();
        let author = form.get("author").trim();
        if title.is_empty() || author.is_empty() {
            info!("No author or title provided");
            self.draft = content.to_string();
            self.toast = Some(Toast::info("Please add a title and an author name."));
            return SubmitOutcome::Skipped;
        }

        let post = NewPost {
            title: title.to_string(),
            author: author.to_string(),
            content: content.to_string(),
        };

        match self.api.create_post(&post).await {
            Ok(created) => {
                info!(response = %created, "Post created successfully");
                self.draft.clear();
                self.toast = Some(Toast::success("Post created successfully."));
                SubmitOutcome::Created
            }
            Err(e) => {
                error!("Something went wrong creating post: {e}");
                self.draft = post.content;
                self.toast = Some(Toast::error("Something went wrong. Please try again."));
                SubmitOutcome::Failed
            }
        }
    }

    /// Render the home page around the current feed.
    #[must_use]
    pub fn render(&self, session: Option<&Session>) -> Markup {
        render_home_page(session, &self.posts, &self.draft, self.toast.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_feed() -> PostFeed {
        PostFeed::new(ApiClient::new("http://127.0.0.1:9").unwrap())
    }

    #[tokio::test]
    async fn test_post_click_navigates_to_detail() {
        let mut feed = offline_feed();
        let action = feed.handle_event(&UiEvent::post_clicked("42")).await;
        assert_eq!(
            action,
            Some(FeedAction::Navigate("post-detail.html?id=42".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_title_keeps_draft() {
        let mut feed = offline_feed();
        let form = FormData::new()
            .field("content", "Hello world")
            .field("title", "  ")
            .field("author", "Ada");
        assert_eq!(feed.submit_post(&form).await, SubmitOutcome::Skipped);
        assert_eq!(feed.draft(), "Hello world");
        assert!(feed.toast().is_some());
    }

    #[tokio::test]
    async fn test_unrelated_event_is_ignored() {
        let mut feed = offline_feed();
        let event = UiEvent::question_toggled("1", true);
        assert_eq!(feed.handle_event(&event).await, None);
    }
}
