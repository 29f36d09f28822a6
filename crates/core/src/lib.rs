pub mod catalog;
pub mod config;
pub mod metrics;
pub mod search;
pub mod store;
pub mod testing;

pub use catalog::{CatalogError, Movie, MovieCatalog, SearchPage, TmdbCatalog, TmdbConfig};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use search::{SearchCoordinator, SearchPhase, SearchSnapshot};
pub use store::{MovieStore, SqliteMovieStore, StoreError, CACHE_TTL_SECS};
