use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::GameRecord;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot open game database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("game store already closed")]
    Closed,
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Append-only SQLite table of harvested games, keyed by `game_id`.
///
/// Writes go into a transaction that stays open until [`GameStore::commit`],
/// so a crash loses at most the records written since the last commit.
#[derive(Debug)]
pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn ensure_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                game_id TEXT PRIMARY KEY,
                winner INTEGER,
                gcg TEXT,
                player1 TEXT,
                player2 TEXT
            );
            "#,
        )?;
        Ok(())
    }

    pub fn exists(&self, game_id: &str) -> Result<bool, StorageError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM games WHERE game_id = ?1",
                params![game_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Insert unless a row with the same id exists. Returns whether a row was written.
    pub fn insert_if_absent(&mut self, record: &GameRecord) -> Result<bool, StorageError> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO games (game_id, winner, gcg, player1, player2)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.game_id,
                record.winner,
                record.transcript,
                record.player1,
                record.player2
            ],
        )?;
        Ok(changed == 1)
    }

    /// Commit pending writes. No-op when nothing is pending.
    pub fn commit(&mut self) -> Result<(), StorageError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    pub fn get(&self, game_id: &str) -> Result<Option<GameRecord>, StorageError> {
        let record = self
            .conn
            .query_row(
                "SELECT game_id, winner, gcg, player1, player2 FROM games WHERE game_id = ?1",
                params![game_id],
                |row| {
                    Ok(GameRecord {
                        game_id: row.get(0)?,
                        winner: row.get(1)?,
                        transcript: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        player1: row.get(3)?,
                        player2: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    pub fn count(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Release the connection. Uncommitted writes are rolled back by SQLite.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, err)| StorageError::Sqlite(err))
    }
}
