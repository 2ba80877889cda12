//! Data fetcher: typed access to the Blogify backend.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;
