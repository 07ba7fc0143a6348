//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};

/// Shared context for all routes: the database location.
///
/// Each request opens its own connection and drops it when the handler
/// returns, so no connection state outlives a request. Multi-statement
/// writes open a transaction on that connection; everything commits
/// together or rolls back on drop.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }

    /// Open a connection for the current request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::sqlite::open_connection(&self.db_path)
    }
}
