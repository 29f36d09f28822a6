//! Search coordinator - cache-first search, ordered pagination, favorites.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::types::{SearchPhase, SearchSnapshot};
use crate::catalog::{Movie, MovieCatalog};
use crate::metrics;
use crate::store::{MovieStore, StoreError};

/// Mutable session state, everything behind one lock.
struct SessionState {
    snapshot: SearchSnapshot,
    favorites: Vec<Movie>,
    /// Bumped by every new search. In-flight work tagged with an older
    /// generation is discarded when it completes.
    generation: u64,
}

/// The search session coordinator.
///
/// Holds the current search snapshot and the in-memory favorites snapshot,
/// and drives both against the remote catalog and the local store:
///
/// - `start_search` consults the cache before the catalog; fresh first pages
///   are answered locally without a network call.
/// - `load_more` appends follow-up pages strictly in order; those pages are
///   never cached.
/// - `toggle_favorite` writes through the store, then reloads the favorites
///   snapshot in full.
///
/// All methods take `&self`; the coordinator is shared behind an `Arc`.
/// The internal lock is never held across an await.
pub struct SearchCoordinator {
    catalog: Arc<dyn MovieCatalog>,
    store: Arc<dyn MovieStore>,
    state: Mutex<SessionState>,
    watch_tx: watch::Sender<SearchSnapshot>,
}

impl SearchCoordinator {
    /// Create a new coordinator and load the favorites snapshot.
    ///
    /// A store failure at this point starts the session with an empty
    /// snapshot; the first successful reload heals it.
    pub fn new(catalog: Arc<dyn MovieCatalog>, store: Arc<dyn MovieStore>) -> Self {
        let snapshot = SearchSnapshot::idle();
        let (watch_tx, _) = watch::channel(snapshot.clone());

        let coordinator = Self {
            catalog,
            store,
            state: Mutex::new(SessionState {
                snapshot,
                favorites: Vec::new(),
                generation: 0,
            }),
            watch_tx,
        };

        if let Err(e) = coordinator.reload_favorites() {
            warn!("Failed to load favorites at startup: {}", e);
        }

        coordinator
    }

    /// Current search snapshot.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.lock().unwrap().snapshot.clone()
    }

    /// Subscribe to committed snapshot transitions.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.watch_tx.subscribe()
    }

    /// Start a new search for `term`, superseding any search in flight.
    ///
    /// The term is trimmed first; an empty term leaves the session untouched.
    /// Returns the snapshot the search settled on.
    pub async fn start_search(&self, term: &str) -> SearchSnapshot {
        let term = term.trim().to_string();
        if term.is_empty() {
            debug!("Ignoring search for empty term");
            return self.snapshot();
        }

        // Begin a new generation, superseding any in-flight work
        let generation = {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            let generation = state.generation;
            self.commit(
                &mut state,
                SearchSnapshot {
                    phase: SearchPhase::Loading,
                    term: term.clone(),
                    results: Vec::new(),
                    current_page: 0,
                    total_pages: 0,
                    total_results: 0,
                    from_cache: false,
                    error: None,
                },
            );
            generation
        };

        // Cache first. A fresh entry answers the search without the catalog.
        match self.store.cached_search(&term) {
            Ok(Some(movies)) => {
                debug!("Cache hit for '{}' ({} movies)", term, movies.len());
                metrics::SEARCHES_TOTAL.with_label_values(&["cache"]).inc();

                let mut state = self.state.lock().unwrap();
                if state.generation != generation {
                    return state.snapshot.clone();
                }
                let total_results = movies.len() as u64;
                self.commit(
                    &mut state,
                    SearchSnapshot {
                        phase: SearchPhase::Ready,
                        term,
                        results: movies,
                        current_page: 1,
                        total_pages: 1,
                        total_results,
                        from_cache: true,
                        error: None,
                    },
                );
                return state.snapshot.clone();
            }
            Ok(None) => {}
            Err(e) => {
                // A broken cache must not break search, go to the catalog
                warn!("Cache read failed for '{}': {}", term, e);
            }
        }

        let result = self.catalog.search(&term, 1).await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!("Discarding superseded search response for '{}'", term);
            return state.snapshot.clone();
        }

        match result {
            Ok(page) => {
                metrics::SEARCHES_TOTAL
                    .with_label_values(&["network"])
                    .inc();
                metrics::SEARCH_RESULTS
                    .with_label_values(&[])
                    .observe(page.results.len() as f64);

                // The search already succeeded, a cache write failure only
                // costs the next lookup
                match self.store.put_cached_search(&term, &page.results) {
                    Ok(()) => metrics::CACHE_WRITES_TOTAL.inc(),
                    Err(e) => warn!("Failed to cache results for '{}': {}", term, e),
                }

                self.commit(
                    &mut state,
                    SearchSnapshot {
                        phase: SearchPhase::Ready,
                        term,
                        results: page.results,
                        current_page: page.page,
                        total_pages: page.total_pages,
                        total_results: page.total_results,
                        from_cache: false,
                        error: None,
                    },
                );
            }
            Err(e) => {
                metrics::SEARCH_ERRORS_TOTAL.inc();
                warn!("Search for '{}' failed: {}", term, e);
                self.commit(
                    &mut state,
                    SearchSnapshot {
                        phase: SearchPhase::Failed,
                        term,
                        results: Vec::new(),
                        current_page: 0,
                        total_pages: 0,
                        total_results: 0,
                        from_cache: false,
                        error: Some(e.to_string()),
                    },
                );
            }
        }

        state.snapshot.clone()
    }

    /// Fetch the next page for the current term and append it.
    ///
    /// No-op while a request is in flight or when the last page has been
    /// reached. Follow-up pages always come from the catalog and are never
    /// cached. On failure the accumulated results and the page counter stay
    /// put, so a retry fetches the same page again.
    pub async fn load_more(&self) -> SearchSnapshot {
        let (generation, term, requested_page) = {
            let mut state = self.state.lock().unwrap();
            if state.snapshot.phase == SearchPhase::Loading || !state.snapshot.has_more() {
                return state.snapshot.clone();
            }

            let mut snapshot = state.snapshot.clone();
            snapshot.phase = SearchPhase::Loading;
            snapshot.error = None;
            let requested_page = snapshot.current_page + 1;
            let term = snapshot.term.clone();
            let generation = state.generation;
            self.commit(&mut state, snapshot);
            (generation, term, requested_page)
        };

        debug!("Loading page {} for '{}'", requested_page, term);
        let result = self.catalog.search(&term, requested_page).await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!(
                "Discarding superseded page {} for '{}'",
                requested_page, term
            );
            return state.snapshot.clone();
        }

        match result {
            Ok(page) => {
                metrics::SEARCHES_TOTAL
                    .with_label_values(&["network"])
                    .inc();
                metrics::SEARCH_RESULTS
                    .with_label_values(&[])
                    .observe(page.results.len() as f64);

                let mut snapshot = state.snapshot.clone();
                snapshot.phase = SearchPhase::Ready;
                snapshot.results.extend(page.results);
                snapshot.current_page = requested_page;
                snapshot.total_pages = page.total_pages;
                snapshot.total_results = page.total_results;
                snapshot.from_cache = false;
                snapshot.error = None;
                self.commit(&mut state, snapshot);
            }
            Err(e) => {
                metrics::SEARCH_ERRORS_TOTAL.inc();
                warn!("Loading page {} for '{}' failed: {}", requested_page, term, e);

                let mut snapshot = state.snapshot.clone();
                snapshot.phase = SearchPhase::Failed;
                snapshot.error = Some(e.to_string());
                // current_page untouched so the retry fetches this page again
                self.commit(&mut state, snapshot);
            }
        }

        state.snapshot.clone()
    }

    /// Toggle a movie's favorite status, writing through the store.
    ///
    /// Returns whether the movie is a favorite afterwards. The in-memory
    /// snapshot only changes once the store write and the full reload both
    /// succeeded.
    pub fn toggle_favorite(&self, movie: &Movie) -> Result<bool, StoreError> {
        let was_favorite = self.is_favorite(movie.id);

        if was_favorite {
            self.store.remove_favorite(movie.id)?;
        } else {
            self.store.add_favorite(movie)?;
        }

        let action = if was_favorite { "removed" } else { "added" };
        metrics::FAVORITE_TOGGLES_TOTAL
            .with_label_values(&[action])
            .inc();
        debug!("Favorite {} for movie {} '{}'", action, movie.id, movie.title);

        // Reload in full, the store is authoritative
        self.reload_favorites()?;

        Ok(!was_favorite)
    }

    /// Whether a movie is currently a favorite. Pure in-memory lookup.
    pub fn is_favorite(&self, movie_id: i64) -> bool {
        self.state
            .lock()
            .unwrap()
            .favorites
            .iter()
            .any(|m| m.id == movie_id)
    }

    /// The current favorites snapshot, in the order they were added.
    pub fn favorites(&self) -> Vec<Movie> {
        self.state.lock().unwrap().favorites.clone()
    }

    /// Refresh the favorites snapshot from the store.
    ///
    /// On failure the previous snapshot is retained.
    pub fn reload_favorites(&self) -> Result<(), StoreError> {
        let favorites = self.store.favorites()?;
        self.state.lock().unwrap().favorites = favorites;
        Ok(())
    }

    fn commit(&self, state: &mut SessionState, snapshot: SearchSnapshot) {
        state.snapshot = snapshot.clone();
        self.watch_tx.send_replace(snapshot);
    }
}
