//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, MovieCatalog, SearchPage};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub term: String,
    pub page: u32,
}

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable result pages per term and page number
/// - Track queries for assertions
/// - Simulate failures and slow responses
///
/// # Example
///
/// ```rust,ignore
/// use cinescout_core::testing::{MockCatalog, fixtures};
///
/// let catalog = MockCatalog::new();
///
/// // Configure a two-page result set
/// catalog.add_page("dune", fixtures::page(1, 2, vec![fixtures::movie(1, "Dune")])).await;
///
/// // Search
/// let page = catalog.search("dune", 1).await?;
/// assert_eq!(page.results.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockCatalog {
    /// Result pages by (lowercased term, page number).
    pages: Arc<RwLock<HashMap<(String, u32), SearchPage>>>,
    /// Recorded queries, including ones answered with an injected error.
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
    /// If set, the next query will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// Artificial latency per lowercased term.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delays: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // =========================================================================
    // Result Configuration
    // =========================================================================

    /// Add a result page for a term. Terms match case-insensitively,
    /// like the real catalog.
    pub async fn add_page(&self, term: &str, page: SearchPage) {
        self.pages
            .write()
            .await
            .insert((term.to_lowercase(), page.page), page);
    }

    /// Clear all configured pages.
    pub async fn clear_pages(&self) {
        self.pages.write().await.clear();
    }

    /// Delay responses for a term by the given duration.
    pub async fn set_delay(&self, term: &str, delay: Duration) {
        self.delays
            .write()
            .await
            .insert(term.to_lowercase(), delay);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next query to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    async fn search(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError> {
        let key = (term.to_lowercase(), page);

        self.queries.write().await.push(RecordedQuery {
            term: term.to_string(),
            page,
        });

        // Copy the delay out before sleeping, the lock must not span the await
        let delay = self.delays.read().await.get(&key.0).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let pages = self.pages.read().await;
        match pages.get(&key) {
            Some(found) => Ok(found.clone()),
            // Unknown terms answer like an empty catalog
            None => Ok(SearchPage {
                page,
                results: Vec::new(),
                total_pages: page,
                total_results: 0,
            }),
        }
    }
}
