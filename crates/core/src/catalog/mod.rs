//! Remote movie catalog integration.
//!
//! This module provides the client for querying the remote movie catalog
//! (TMDB) that backs search. Results flow into the search coordinator and,
//! for first pages, into the local cache.

mod tmdb;
mod types;

pub use tmdb::{TmdbCatalog, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request rejected before any I/O (empty term, page 0).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request failed (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for movie catalog clients.
///
/// The production implementation is [`TmdbCatalog`]; tests substitute
/// `testing::MockCatalog`. One page per call, no retries. Callers decide
/// what to cache.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search for movies by term, one page at a time (1-indexed).
    async fn search(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError>;
}
