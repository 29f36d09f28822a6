//! Search session integration tests.
//!
//! These tests drive the coordinator against a real on-disk store and verify
//! the flows that span components: search, pagination, caching across
//! restarts and favorite persistence.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use cinescout_core::{
    testing::{fixtures, MockCatalog},
    MovieStore, SearchCoordinator, SearchPhase, SqliteMovieStore,
};

/// Test helper bundling a coordinator with its backing store and catalog.
struct TestHarness {
    catalog: Arc<MockCatalog>,
    store: Arc<SqliteMovieStore>,
    coordinator: Arc<SearchCoordinator>,
    db_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("cinescout.db");
        let catalog = Arc::new(MockCatalog::new());
        let store = Arc::new(SqliteMovieStore::new(&db_path).expect("Failed to open store"));
        let coordinator = Arc::new(SearchCoordinator::new(catalog.clone(), store.clone()));

        Self {
            catalog,
            store,
            coordinator,
            db_path,
            _temp_dir: temp_dir,
        }
    }

    /// Simulate a process restart: a fresh catalog, store and coordinator
    /// over the same database file.
    fn restart(self) -> Self {
        let catalog = Arc::new(MockCatalog::new());
        let store =
            Arc::new(SqliteMovieStore::new(&self.db_path).expect("Failed to reopen store"));
        let coordinator = Arc::new(SearchCoordinator::new(catalog.clone(), store.clone()));

        Self {
            catalog,
            store,
            coordinator,
            db_path: self.db_path,
            _temp_dir: self._temp_dir,
        }
    }
}

#[tokio::test]
async fn test_search_paginate_and_favorite_flow() {
    let harness = TestHarness::new();
    harness
        .catalog
        .add_page(
            "dune",
            fixtures::page(
                1,
                2,
                vec![fixtures::movie(1, "Dune"), fixtures::movie(2, "Dune: Part Two")],
            ),
        )
        .await;
    harness
        .catalog
        .add_page(
            "dune",
            fixtures::page(2, 2, vec![fixtures::movie(3, "Dune (1984)")]),
        )
        .await;

    let snapshot = harness.coordinator.start_search("dune").await;
    assert_eq!(snapshot.phase, SearchPhase::Ready);
    assert_eq!(snapshot.results.len(), 2);

    let snapshot = harness.coordinator.load_more().await;
    assert_eq!(snapshot.current_page, 2);
    assert_eq!(snapshot.results.len(), 3);
    assert!(!snapshot.has_more());

    // Favorite a movie straight out of the results
    let movie = snapshot.results[2].clone();
    assert!(harness.coordinator.toggle_favorite(&movie).expect("toggle failed"));
    assert!(harness.coordinator.is_favorite(3));
    assert_eq!(harness.coordinator.favorites().len(), 1);

    // Only the first page went into the cache
    let cached = harness
        .store
        .cached_search("dune")
        .expect("cache read failed")
        .expect("cache miss");
    assert_eq!(cached.len(), 2);
}

#[tokio::test]
async fn test_cached_search_survives_restart() {
    let harness = TestHarness::new();
    harness
        .catalog
        .add_page("alien", fixtures::page(1, 1, vec![fixtures::movie(10, "Alien")]))
        .await;

    let snapshot = harness.coordinator.start_search("alien").await;
    assert!(!snapshot.from_cache);
    assert_eq!(harness.catalog.query_count().await, 1);

    // After a restart the same search is answered from disk
    let harness = harness.restart();
    let snapshot = harness.coordinator.start_search("Alien").await;
    assert_eq!(snapshot.phase, SearchPhase::Ready);
    assert!(snapshot.from_cache);
    assert_eq!(snapshot.results[0].title, "Alien");
    assert_eq!(harness.catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_distinct_terms_cached_independently() {
    let harness = TestHarness::new();
    harness
        .catalog
        .add_page("dune", fixtures::page(1, 1, vec![fixtures::movie(1, "Dune")]))
        .await;
    harness
        .catalog
        .add_page("alien", fixtures::page(1, 1, vec![fixtures::movie(10, "Alien")]))
        .await;

    harness.coordinator.start_search("dune").await;
    harness.coordinator.start_search("alien").await;
    assert_eq!(harness.catalog.query_count().await, 2);

    let harness = harness.restart();
    let dune = harness.coordinator.start_search("dune").await;
    let alien = harness.coordinator.start_search("alien").await;
    assert!(dune.from_cache);
    assert!(alien.from_cache);
    assert_eq!(harness.catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_favorites_survive_restart() {
    let harness = TestHarness::new();
    harness
        .coordinator
        .toggle_favorite(&fixtures::movie(603, "The Matrix"))
        .expect("toggle failed");
    harness
        .coordinator
        .toggle_favorite(&fixtures::movie(78, "Blade Runner"))
        .expect("toggle failed");

    let harness = harness.restart();
    let favorites = harness.coordinator.favorites();
    let titles: Vec<&str> = favorites.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix", "Blade Runner"]);

    // Removing one also survives a restart
    harness
        .coordinator
        .toggle_favorite(&fixtures::movie(603, "The Matrix"))
        .expect("toggle failed");

    let harness = harness.restart();
    assert!(!harness.coordinator.is_favorite(603));
    assert!(harness.coordinator.is_favorite(78));
    assert_eq!(harness.coordinator.favorites().len(), 1);
}

#[tokio::test]
async fn test_subscriber_follows_session() {
    let harness = TestHarness::new();
    harness
        .catalog
        .add_page("heat", fixtures::page(1, 2, vec![fixtures::movie(949, "Heat")]))
        .await;
    harness
        .catalog
        .add_page(
            "heat",
            fixtures::page(2, 2, vec![fixtures::movie(950, "Heat 2")]),
        )
        .await;

    let mut rx = harness.coordinator.subscribe();
    assert_eq!(rx.borrow_and_update().phase, SearchPhase::Idle);

    harness.coordinator.start_search("heat").await;
    assert!(rx.has_changed().expect("watch closed"));
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.phase, SearchPhase::Ready);
    assert_eq!(snapshot.current_page, 1);

    harness.coordinator.load_more().await;
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.phase, SearchPhase::Ready);
    assert_eq!(snapshot.current_page, 2);
    assert_eq!(snapshot.results.len(), 2);
}
