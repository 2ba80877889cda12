//! Shared constants used across the application.

/// Backend used when the front-end is reached on a loopback host.
pub const LOCAL_BACKEND_URL: &str = "http://localhost:8081";

/// Backend used for every other host.
pub const DEPLOYED_BACKEND_URL: &str = "https://blogify-bk6w.onrender.com";

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key holding the decoded token claims as a JSON blob.
pub const USER_KEY: &str = "user";

/// User agent string sent with backend requests.
pub const CLIENT_USER_AGENT: &str = concat!("blogify-client/", env!("CARGO_PKG_VERSION"));

/// Section filter value that shows every section.
pub const ALL_SECTIONS: &str = "ALL";
