//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the catalog trait plus
//! fixture helpers, allowing full search flows to be tested without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinescout_core::testing::{MockCatalog, fixtures};
//!
//! let catalog = MockCatalog::new();
//!
//! // Configure mock responses
//! catalog.add_page("dune", fixtures::page(1, 1, vec![fixtures::movie(1, "Dune")])).await;
//!
//! // Use in a coordinator or AppState...
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCatalog, RecordedQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{Movie, SearchPage};

    /// Create a test movie with reasonable defaults.
    pub fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: format!("A movie about {}.", title.to_lowercase()),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2024-06-15".to_string()),
        }
    }

    /// Create a test result page.
    ///
    /// The total result count is derived as movies-per-page times pages,
    /// which is what a uniformly filled result set would report.
    pub fn page(page: u32, total_pages: u32, results: Vec<Movie>) -> SearchPage {
        let total_results = results.len() as u64 * total_pages as u64;
        SearchPage {
            page,
            results,
            total_pages,
            total_results,
        }
    }
}
