//! Search session coordination.
//!
//! The coordinator glues the remote catalog and the local store together:
//! cache-first search, strictly ordered pagination, and write-through
//! favorites with an in-memory snapshot.

mod coordinator;
mod types;

pub use coordinator::SearchCoordinator;
pub use types::{SearchPhase, SearchSnapshot};
