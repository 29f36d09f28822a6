//! Domain types for movie search.

use serde::{Deserialize, Serialize};

/// A movie record as surfaced by search, favorites and the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: i64,
    /// Movie title.
    pub title: String,
    /// Movie overview/synopsis (may be empty).
    #[serde(default)]
    pub overview: String,
    /// Poster path (relative to the image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl Movie {
    /// Get the release year from the release date.
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_ref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }

    /// Build the full poster URL against an image base, if a poster exists.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("{}{}", image_base_url.trim_end_matches('/'), p))
    }
}

/// One page of search results from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    /// Page number (1-indexed).
    pub page: u32,
    /// Movies on this page, in catalog relevance order.
    pub results: Vec<Movie>,
    /// Total number of pages available for this term.
    pub total_pages: u32,
    /// Total number of matching movies across all pages.
    pub total_results: u64,
}

impl SearchPage {
    /// Whether the catalog has pages beyond this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
