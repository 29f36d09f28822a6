//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Movie, SearchPage};
use super::{CatalogError, MovieCatalog};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters (default: https://image.tmdb.org/t/p/w500).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// HTTP request timeout in seconds (default: 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// TMDB API client.
pub struct TmdbCatalog {
    client: Client,
    base_url: String,
    api_key: String,
    image_base_url: String,
}

impl TmdbCatalog {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder().timeout(timeout).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let image_base_url = config
            .image_base_url
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            image_base_url,
        })
    }

    /// Base URL used to resolve poster paths into full URLs.
    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Search for movies by term, fetching the given page (1-indexed).
    pub async fn search_movies(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError> {
        if term.trim().is_empty() {
            return Err(CatalogError::InvalidRequest(
                "search term cannot be empty".to_string(),
            ));
        }
        if page == 0 {
            return Err(CatalogError::InvalidRequest(
                "page must be at least 1".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: term='{}', page={}", term, page);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", &self.api_key),
                ("query", &term.to_string()),
                ("page", &page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(CatalogError::NotFound(format!(
                "search endpoint not found at {}",
                url
            )));
        }
        if status == 429 {
            return Err(CatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: TmdbSearchResponse = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse movie search response: {}", e))
        })?;

        Ok(search_result.into())
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn search(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError> {
        self.search_movies(term, page).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    page: u32,
    results: Vec<TmdbMovieResult>,
    total_pages: u32,
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: i64,
    title: String,
    overview: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<TmdbMovieResult> for Movie {
    fn from(r: TmdbMovieResult) -> Self {
        Self {
            id: r.id,
            title: r.title,
            overview: r.overview.unwrap_or_default(),
            poster_path: r.poster_path,
            // TMDB sends "" for unknown release dates, normalize to None
            release_date: r.release_date.filter(|d| !d.is_empty()),
        }
    }
}

impl From<TmdbSearchResponse> for SearchPage {
    fn from(r: TmdbSearchResponse) -> Self {
        Self {
            page: r.page,
            results: r.results.into_iter().map(|m| m.into()).collect(),
            total_pages: r.total_pages,
            total_results: r.total_results,
        }
    }
}
