//! Local movie store - favorites and the short-lived search cache.
//!
//! The store keeps durable state on disk so favorites survive restarts and
//! repeated searches can be answered locally. First result pages are cached
//! per search term and expire lazily at read time.

mod sqlite;

pub use sqlite::SqliteMovieStore;

use thiserror::Error;

use crate::catalog::Movie;

/// How long a cached search entry stays fresh, in seconds.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Errors that can occur when reading or writing the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Rejected input (empty cache term, etc.).
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Trait for local movie storage.
///
/// Methods are synchronous; callers must not hold the results across await
/// points while a lock is involved. Search terms are matched
/// case-insensitively, callers pass them already trimmed.
pub trait MovieStore: Send + Sync {
    /// All favorite movies, in the order they were added.
    fn favorites(&self) -> Result<Vec<Movie>, StoreError>;

    /// Add a movie to favorites. Adding an existing favorite again is a
    /// no-op apart from refreshing the stored metadata.
    fn add_favorite(&self, movie: &Movie) -> Result<(), StoreError>;

    /// Remove a movie from favorites. Removing an absent id succeeds.
    fn remove_favorite(&self, movie_id: i64) -> Result<(), StoreError>;

    /// Cached first-page results for a term, or `None` when absent or
    /// expired. Expired entries are deleted on the way out.
    fn cached_search(&self, term: &str) -> Result<Option<Vec<Movie>>, StoreError>;

    /// Replace the cached first-page results for a term atomically.
    fn put_cached_search(&self, term: &str, movies: &[Movie]) -> Result<(), StoreError>;
}
