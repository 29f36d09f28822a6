//! Types for the search session.

use serde::{Deserialize, Serialize};

use crate::catalog::Movie;

/// Lifecycle phase of the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// No search started yet.
    Idle,
    /// A first page or a follow-up page is in flight.
    Loading,
    /// Results are available.
    Ready,
    /// The last operation failed.
    Failed,
}

/// A point-in-time view of the search session.
///
/// Snapshots are immutable values; the coordinator replaces the whole
/// snapshot on every committed transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSnapshot {
    /// Where the session currently is.
    pub phase: SearchPhase,
    /// The trimmed term being (or last) searched, user casing preserved.
    pub term: String,
    /// Accumulated results, in the order pages arrived.
    pub results: Vec<Movie>,
    /// Highest page applied so far (0 before any page landed).
    pub current_page: u32,
    /// Total pages the catalog reports for this term.
    pub total_pages: u32,
    /// Total matching movies across all pages.
    pub total_results: u64,
    /// Whether `results` came from the local cache rather than the catalog.
    pub from_cache: bool,
    /// Message of the failure that put the session in `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchSnapshot {
    /// The snapshot of a session that has not searched yet.
    pub fn idle() -> Self {
        Self {
            phase: SearchPhase::Idle,
            term: String::new(),
            results: Vec::new(),
            current_page: 0,
            total_pages: 0,
            total_results: 0,
            from_cache: false,
            error: None,
        }
    }

    /// Whether the catalog has pages beyond the ones applied.
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}
