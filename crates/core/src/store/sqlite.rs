//! SQLite-backed movie store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{MovieStore, StoreError, CACHE_TTL_SECS};
use crate::catalog::Movie;

/// SQLite-backed movie store.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
}

impl SqliteMovieStore {
    /// Create a new SQLite store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Needed for ON DELETE CASCADE below
            PRAGMA foreign_keys = ON;

            -- Favorite movies (one row per movie id)
            CREATE TABLE IF NOT EXISTS favorite_movies (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                overview TEXT NOT NULL,
                poster_path TEXT,
                release_date TEXT,
                added_at TEXT NOT NULL
            );

            -- One cache entry per normalized (lowercased) search term
            CREATE TABLE IF NOT EXISTS search_cache (
                term TEXT PRIMARY KEY,
                written_at TEXT NOT NULL
            );

            -- First-page movies belonging to a cache entry
            CREATE TABLE IF NOT EXISTS search_cache_movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                term TEXT NOT NULL REFERENCES search_cache(term) ON DELETE CASCADE,
                movie_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                overview TEXT NOT NULL,
                poster_path TEXT,
                release_date TEXT,
                UNIQUE(term, movie_id)
            );

            CREATE INDEX IF NOT EXISTS idx_search_cache_movies_term ON search_cache_movies(term);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Convert a row of (id, title, overview, poster_path, release_date) to a Movie.
    fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
        Ok(Movie {
            id: row.get(0)?,
            title: row.get(1)?,
            overview: row.get(2)?,
            poster_path: row.get(3)?,
            release_date: row.get(4)?,
        })
    }

    /// Rewrite a cache entry's timestamp as if it were written `seconds` ago.
    #[cfg(test)]
    pub(crate) fn backdate_cache_entry(&self, term: &str, seconds: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let term = term.to_lowercase();
        let backdated = (Utc::now() - chrono::Duration::seconds(seconds)).to_rfc3339();

        conn.execute(
            "UPDATE search_cache SET written_at = ? WHERE term = ?",
            params![&backdated, &term],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

impl MovieStore for SqliteMovieStore {
    fn favorites(&self) -> Result<Vec<Movie>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT id, title, overview, poster_path, release_date
                 FROM favorite_movies ORDER BY added_at, id",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_movie)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut movies = Vec::new();
        for row in rows {
            movies.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(movies)
    }

    fn add_favorite(&self, movie: &Movie) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let now_str = Utc::now().to_rfc3339();

        // Keep the original added_at on re-add so listing order is stable
        conn.execute(
            "INSERT INTO favorite_movies (id, title, overview, poster_path, release_date, added_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                overview = excluded.overview,
                poster_path = excluded.poster_path,
                release_date = excluded.release_date",
            params![
                movie.id,
                &movie.title,
                &movie.overview,
                &movie.poster_path,
                &movie.release_date,
                &now_str,
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn remove_favorite(&self, movie_id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        // Removing an absent favorite is fine, nothing to report
        conn.execute(
            "DELETE FROM favorite_movies WHERE id = ?",
            params![movie_id],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn cached_search(&self, term: &str) -> Result<Option<Vec<Movie>>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let term = term.to_lowercase();

        let written_at_str = match conn.query_row(
            "SELECT written_at FROM search_cache WHERE term = ?",
            params![&term],
            |row| row.get::<_, String>(0),
        ) {
            Ok(s) => s,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(StoreError::Database(e.to_string())),
        };

        let expired = match DateTime::parse_from_rfc3339(&written_at_str) {
            Ok(dt) => {
                (Utc::now() - dt.with_timezone(&Utc)).num_seconds() >= CACHE_TTL_SECS
            }
            // Unreadable timestamp, refresh the entry
            Err(_) => true,
        };

        if expired {
            // Cascades to search_cache_movies
            conn.execute("DELETE FROM search_cache WHERE term = ?", params![&term])
                .map_err(|e| StoreError::Database(e.to_string()))?;
            return Ok(None);
        }

        let mut stmt = conn
            .prepare(
                "SELECT movie_id, title, overview, poster_path, release_date
                 FROM search_cache_movies WHERE term = ? ORDER BY title",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![&term], Self::row_to_movie)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut movies = Vec::new();
        for row in rows {
            movies.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(Some(movies))
    }

    fn put_cached_search(&self, term: &str, movies: &[Movie]) -> Result<(), StoreError> {
        if term.trim().is_empty() {
            return Err(StoreError::InvalidData(
                "cache term cannot be empty".to_string(),
            ));
        }

        let mut conn = self.conn.lock().unwrap();
        let term = term.to_lowercase();
        let now_str = Utc::now().to_rfc3339();

        // Replace the whole entry in one transaction so readers never see a
        // half-written page
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tx.execute("DELETE FROM search_cache WHERE term = ?", params![&term])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tx.execute(
            "INSERT INTO search_cache (term, written_at) VALUES (?, ?)",
            params![&term, &now_str],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        for movie in movies {
            // OR IGNORE drops duplicate ids within the same page
            tx.execute(
                "INSERT OR IGNORE INTO search_cache_movies
                 (term, movie_id, title, overview, poster_path, release_date)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    &term,
                    movie.id,
                    &movie.title,
                    &movie.overview,
                    &movie.poster_path,
                    &movie.release_date,
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        tx.commit().map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
