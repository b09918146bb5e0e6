//! Shared plumbing for the tome workspace.
//!
//! This crate holds the pieces every other crate leans on: the tracing
//! initialiser in [`observability`] and the [`TomeError`] / [`Result`] pair
//! used for startup and output failures. It stays deliberately small so the
//! crawler, config loader and binary can all depend on it cheaply.
//!
//! # Examples
//!
//! ```rust
//! use tome_common::TomeError;
//!
//! let err = TomeError::Seed("no usable seed URL".into());
//! assert_eq!(err.to_string(), "Seed error: no usable seed URL");
//! ```

pub mod observability;

/// Errors that stop a crawl job before or after the loop runs.
///
/// Page-level problems (timeouts, missing content, malformed links) are never
/// represented here; the crawler logs and skips those.
#[derive(thiserror::Error, Debug)]
pub enum TomeError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A content or navigation selector failed to parse.
    #[error("Invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// None of the configured seeds could be used to start a crawl.
    #[error("Seed error: {0}")]
    Seed(String),

    /// The HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),

    /// Reading or writing the corpus failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient alias for results that use [`TomeError`].
pub type Result<T> = std::result::Result<T, TomeError>;
