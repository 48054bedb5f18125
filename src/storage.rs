use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::models::{Conversation, User};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no data directory available")]
    NoDataDir,
}

/// A record kind the cache knows how to key.
pub trait Cached: Serialize + DeserializeOwned {
    const KIND: &'static str;
    fn cache_id(&self) -> &str;
}

impl Cached for User {
    const KIND: &'static str = "user";
    fn cache_id(&self) -> &str {
        &self.id
    }
}

impl Cached for Conversation {
    const KIND: &'static str = "conversation";
    fn cache_id(&self) -> &str {
        &self.id
    }
}

pub fn db_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "example", "WppConsole")?;
    Some(proj.data_dir().join("cache.sqlite"))
}

/// Last successfully loaded collections, kept so the console still shows
/// something when the backend is unreachable.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn open_default() -> Result<Self, CacheError> {
        let path = db_path().ok_or(CacheError::NoDataDir)?;
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self, CacheError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, CacheError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, CacheError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                position INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                raw_json TEXT NOT NULL,
                PRIMARY KEY (kind, id)
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    /// Replaces every cached record of `R`'s kind with `records`.
    pub fn store<R: Cached>(&mut self, records: &[R]) -> Result<(), CacheError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM records WHERE kind = ?1", params![R::KIND])?;
        for (idx, record) in records.iter().enumerate() {
            let raw = serde_json::to_string(record)?;
            tx.execute(
                r#"
                INSERT INTO records (kind, id, position, updated_at, raw_json)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(kind, id) DO UPDATE SET
                    position=excluded.position,
                    updated_at=excluded.updated_at,
                    raw_json=excluded.raw_json
                "#,
                params![R::KIND, record.cache_id(), idx as i64, now, raw],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Cached records of `R`'s kind in the order they were stored.
    pub fn load<R: Cached>(&self, limit: Option<usize>) -> Result<Vec<R>, CacheError> {
        let mut stmt = self.conn.prepare(
            "SELECT raw_json FROM records WHERE kind = ?1 ORDER BY position ASC LIMIT ?2",
        )?;
        let lim = limit.unwrap_or(500) as i64;
        let rows = stmt.query_map(params![R::KIND, lim], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for raw in rows {
            out.push(serde_json::from_str(&raw?)?);
        }
        Ok(out)
    }

    pub fn last_updated<R: Cached>(&self) -> Result<Option<i64>, CacheError> {
        let ts = self
            .conn
            .query_row(
                "SELECT MAX(updated_at) FROM records WHERE kind = ?1",
                params![R::KIND],
                |row| row.get::<_, Option<i64>>(0),
            )
            .optional()?;
        Ok(ts.flatten())
    }
}
