//! Full-page templates.

use maud::{html, Markup, Render};

use super::posts::{render_post_composer, render_post_detail, render_posts};
use crate::auth::Session;
use crate::components::{message_slot, Alert, BaseLayout, Button, Form, FormGroup, Input, Toast};
use crate::models::Post;

/// Home page: post composer plus the loaded post list.
#[must_use]
pub fn render_home_page(
    session: Option<&Session>,
    posts: &[Post],
    draft: &str,
    toast: Option<&Toast>,
) -> Markup {
    let content = html! {
        h1 { "Blogify" }
        (message_slot(toast))
        section class="composer" {
            (render_post_composer(draft))
        }
        section class="feed" {
            (Form::get("/posts", html! {
                (Button::outline("Load posts").r#type("submit").id("loadPosts"))
            }))
            (render_posts(posts))
        }
    };

    BaseLayout::new("Home", session).render(content)
}

/// Single post page.
#[must_use]
pub fn render_post_page(session: Option<&Session>, post: &Post) -> Markup {
    BaseLayout::new(&post.title, session).render(render_post_detail(post))
}

/// Shown when a post id is not among the loaded posts.
#[must_use]
pub fn render_post_not_found(session: Option<&Session>) -> Markup {
    let content = html! {
        h1 { "Post not found" }
        p { "Load the post list first, then pick a post." }
        (Button::outline("Back to posts").href("/posts"))
    };
    BaseLayout::new("Post not found", session).render(content)
}

/// Login page with email/password and Google sign-in.
#[must_use]
pub fn render_login_page(error: Option<&str>, notice: Option<&str>) -> Markup {
    let content = html! {
        div class="auth-container" {
            h1 { "Login" }
            @if let Some(notice) = notice {
                (Alert::success(notice))
            }
            @if let Some(e) = error {
                (Alert::error(e))
            }
            (Form::post("/login", html! {
                (FormGroup::new("Email", "email", Input::email("email").id("email").autocomplete("email").required().render()))
                (FormGroup::new("Password", "password", Input::password("password").id("password").autocomplete("current-password").required().render()))
                (Button::primary("Login").r#type("submit"))
            }).id("loginForm"))
            p { (Button::outline("Sign in with Google").href("/oauth/google")) }
            p { "No account? " a href="/register" { "Sign up" } }
        }
    };

    BaseLayout::new("Login", None).render(content)
}

/// Sign-up page.
#[must_use]
pub fn render_register_page(error: Option<&str>) -> Markup {
    let content = html! {
        div class="auth-container" {
            h1 { "Sign up" }
            @if let Some(e) = error {
                (Alert::error(e))
            }
            (Form::post("/register", html! {
                (FormGroup::new("Name", "name", Input::text("name").id("name").autocomplete("name").required().render()))
                (FormGroup::new("Email", "email", Input::email("email").id("email").autocomplete("email").required().render()))
                (FormGroup::new("Password", "password", Input::password("password").id("password").autocomplete("new-password").required().render()))
                (Button::primary("Create account").r#type("submit"))
            }).id("registerForm"))
            p { "Already registered? " a href="/login" { "Login" } }
        }
    };

    BaseLayout::new("Sign up", None).render(content)
}
