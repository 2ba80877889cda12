//! Blogify client library.
//!
//! A local web front-end for the Blogify backend: a blog post feed and a DSA
//! question sheet with per-user progress, rendered server-side.

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod constants;
pub mod models;
pub mod render;
pub mod ui;
pub mod web;
