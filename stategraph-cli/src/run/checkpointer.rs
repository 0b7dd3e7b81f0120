//! Checkpointer selection: SQLite when a database path is configured, memory otherwise.

use std::sync::Arc;

use stategraph::{Checkpointer, JsonState, MemorySaver};

use crate::config::WorkflowConfig;

use super::Error;

pub(super) fn checkpointer(
    config: &WorkflowConfig,
) -> Result<Arc<dyn Checkpointer<JsonState>>, Error> {
    match config.db_path.as_deref() {
        Some(path) => open_sqlite(path),
        None => Ok(Arc::new(MemorySaver::<JsonState>::new())),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &str) -> Result<Arc<dyn Checkpointer<JsonState>>, Error> {
    use stategraph::{JsonSerializer, SqliteSaver};

    let saver = SqliteSaver::<JsonState>::new(path, Arc::new(JsonSerializer))?;
    Ok(Arc::new(saver))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(path: &str) -> Result<Arc<dyn Checkpointer<JsonState>>, Error> {
    Err(format!("db path {} needs the sqlite feature; rebuild with --features sqlite", path).into())
}
