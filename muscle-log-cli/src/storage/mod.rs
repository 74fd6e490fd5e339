// Local storage module using sled embedded database.
// Holds lift logs that still owe requests after a partial save.

use anyhow::{Context, Result};
use sled::Db;
use std::path::{Path, PathBuf};

use crate::workout::PendingLiftLog;

const PENDING_LIFTS_TREE: &str = "pending_lift_logs";

/// Storage manager for local embedded database
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Get database directory path (~/.muscle-log/queue)
    pub fn db_path() -> Result<PathBuf> {
        // Check for test environment variable first
        if let Ok(test_path) = std::env::var("MUSCLE_LOG_DB_PATH") {
            return Ok(PathBuf::from(test_path));
        }

        let config_dir = crate::config::Config::config_dir()?;
        Ok(config_dir.join("queue"))
    }

    /// Initialize storage with sled database
    pub fn init() -> Result<Self> {
        Self::open(&Self::db_path()?)
    }

    /// Open a database at an explicit path
    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!("Initializing sled database at {:?}", path);

        let db = sled::open(path).context("Failed to open sled database")?;

        Ok(Self { db })
    }

    /// Remember a lift log that stopped partway, keyed by session id
    pub fn save_pending(&self, pending: &PendingLiftLog) -> Result<()> {
        let tree = self
            .db
            .open_tree(PENDING_LIFTS_TREE)
            .context("Failed to open pending lift log tree")?;

        let key = pending.session_id.to_be_bytes();
        let value = bincode::serialize(pending).context("Failed to serialize pending lift log")?;

        tree.insert(key, value)
            .context("Failed to insert pending lift log")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!(
            "Queued {} lift log entries for session {}",
            pending.remaining.len(),
            pending.session_id
        );
        Ok(())
    }

    /// Get the pending lift log of one session
    pub fn get_pending(&self, session_id: i64) -> Result<Option<PendingLiftLog>> {
        let tree = self
            .db
            .open_tree(PENDING_LIFTS_TREE)
            .context("Failed to open pending lift log tree")?;

        if let Some(value) = tree
            .get(session_id.to_be_bytes())
            .context("Failed to get pending lift log")?
        {
            let pending: PendingLiftLog =
                bincode::deserialize(&value).context("Failed to deserialize pending lift log")?;
            Ok(Some(pending))
        } else {
            Ok(None)
        }
    }

    /// All pending lift logs, oldest session first
    pub fn list_pending(&self) -> Result<Vec<PendingLiftLog>> {
        let tree = self
            .db
            .open_tree(PENDING_LIFTS_TREE)
            .context("Failed to open pending lift log tree")?;

        let mut pending = Vec::new();

        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate pending lift logs")?;
            let entry: PendingLiftLog =
                bincode::deserialize(&value).context("Failed to deserialize pending lift log")?;
            pending.push(entry);
        }

        pending.sort_by_key(|entry| entry.session_id);

        Ok(pending)
    }

    /// Drop a session's pending lift log once it has been completed
    pub fn remove_pending(&self, session_id: i64) -> Result<bool> {
        let tree = self
            .db
            .open_tree(PENDING_LIFTS_TREE)
            .context("Failed to open pending lift log tree")?;

        let removed = tree
            .remove(session_id.to_be_bytes())
            .context("Failed to remove pending lift log")?
            .is_some();

        if removed {
            self.db.flush().context("Failed to flush database")?;
            tracing::debug!("Removed pending lift log for session {}", session_id);
        }

        Ok(removed)
    }
}
