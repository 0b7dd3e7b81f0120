//! SQLite checkpointer (feature `sqlite`).
//!
//! One row per checkpoint; `seq` orders rows by write time so the latest
//! checkpoint of a run is the one written last, even when a run id is reused.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::{Checkpoint, CheckpointError, CheckpointListItem, Checkpointer, Serializer};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS checkpoints (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id TEXT NOT NULL,
    checkpoint_id TEXT NOT NULL,
    node_id TEXT NOT NULL,
    step INTEGER NOT NULL,
    state BLOB NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_checkpoints_run ON checkpoints (run_id, seq);";

type Row = (String, String, i64, Vec<u8>, i64);

/// Persists checkpoints to a SQLite database.
///
/// State is stored as bytes produced by the given [`Serializer`]; use
/// [`JsonSerializer`](super::JsonSerializer) for serde state types. Database calls
/// run on the blocking thread pool.
pub struct SqliteSaver<S> {
    conn: Arc<Mutex<Connection>>,
    serializer: Arc<dyn Serializer<S>>,
}

impl<S> SqliteSaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Opens (or creates) the database file at `path` and ensures the table exists.
    pub fn new(
        path: impl AsRef<Path>,
        serializer: Arc<dyn Serializer<S>>,
    ) -> Result<Self, CheckpointError> {
        let conn = Connection::open(path).map_err(storage)?;
        Self::with_connection(conn, serializer)
    }

    /// Uses a private in-memory database.
    pub fn in_memory(serializer: Arc<dyn Serializer<S>>) -> Result<Self, CheckpointError> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        Self::with_connection(conn, serializer)
    }

    fn with_connection(
        conn: Connection,
        serializer: Arc<dyn Serializer<S>>,
    ) -> Result<Self, CheckpointError> {
        conn.execute_batch(SCHEMA).map_err(storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            serializer,
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, CheckpointError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| CheckpointError::Storage("sqlite connection poisoned".into()))?;
            f(&*guard).map_err(storage)
        })
        .await
        .map_err(|e| CheckpointError::Storage(e.to_string()))?
    }
}

fn storage(e: rusqlite::Error) -> CheckpointError {
    CheckpointError::Storage(e.to_string())
}

fn to_millis(t: SystemTime) -> i64 {
    t.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[async_trait]
impl<S> Checkpointer<S> for SqliteSaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(&self, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError> {
        let bytes = self.serializer.serialize(&checkpoint.state)?;
        let run_id = checkpoint.run_id.clone();
        let checkpoint_id = checkpoint.id.clone();
        let node_id = checkpoint.node_id.clone();
        let step = checkpoint.step as i64;
        let created_at = to_millis(checkpoint.created_at);
        self.blocking(move |conn| {
            conn.execute(
                "INSERT INTO checkpoints (run_id, checkpoint_id, node_id, step, state, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![run_id, checkpoint_id, node_id, step, bytes, created_at],
            )
            .map(|_| ())
        })
        .await
    }

    async fn get_latest(&self, run_id: &str) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let key = run_id.to_string();
        let row: Option<Row> = self
            .blocking(move |conn| {
                conn.query_row(
                    "SELECT checkpoint_id, node_id, step, state, created_at FROM checkpoints
                     WHERE run_id = ?1 ORDER BY seq DESC LIMIT 1",
                    params![key],
                    |row| {
                        Ok::<Row, rusqlite::Error>((
                            row.get(0)?,
                            row.get(1)?,
                            row.get(2)?,
                            row.get(3)?,
                            row.get(4)?,
                        ))
                    },
                )
                .optional()
            })
            .await?;

        let Some((id, node_id, step, bytes, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(Checkpoint {
            id,
            run_id: run_id.to_string(),
            node_id,
            step: step as u64,
            state: self.serializer.deserialize(&bytes)?,
            created_at: SystemTime::UNIX_EPOCH + Duration::from_millis(created_at.max(0) as u64),
        }))
    }

    async fn list(&self, run_id: &str) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let key = run_id.to_string();
        self.blocking(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT checkpoint_id, node_id, step FROM checkpoints
                 WHERE run_id = ?1 ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map(params![key], |row| {
                Ok(CheckpointListItem {
                    checkpoint_id: row.get(0)?,
                    node_id: row.get(1)?,
                    step: row.get::<_, i64>(2)? as u64,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })
        .await
    }
}
