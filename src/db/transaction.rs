//! Transaction module - commit, rollback and auto-commit control
//!
//! SQLite runs every statement in its own transaction unless one is open.
//! Disabling auto-commit opens one immediately; `commit` and `rollback` end
//! it and open the next, so a transaction is always active in manual mode.

use rusqlite::Connection;
use tracing::{debug, warn};

use super::Database;
use crate::error::{Error, Result};

impl Database {
    pub fn is_auto_commit_enabled(&self) -> bool {
        self.auto_commit
    }

    /// Whether the engine currently has a transaction open.
    pub fn in_transaction(&self) -> Result<bool> {
        Ok(!self.connection()?.is_autocommit())
    }

    /// Switch auto-commit on or off. Turning it back on commits the open
    /// transaction.
    pub fn set_auto_commit(&mut self, auto_commit: bool) -> Result<()> {
        if auto_commit == self.auto_commit {
            self.connection()?;
            return Ok(());
        }
        self.run(|conn| {
            if auto_commit {
                if !conn.is_autocommit() {
                    conn.execute_batch("COMMIT;")?;
                }
            } else {
                conn.execute_batch("BEGIN;")?;
            }
            Ok(())
        })?;
        debug!(auto_commit, "changed auto-commit mode");
        self.auto_commit = auto_commit;
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        self.end_transaction("COMMIT;")
    }

    pub fn rollback(&self) -> Result<()> {
        self.end_transaction("ROLLBACK;")
    }

    fn end_transaction(&self, sql: &str) -> Result<()> {
        if self.auto_commit {
            self.connection()?;
            return Err(Error::AutoCommitEnabled);
        }
        self.run(|conn| {
            // a failed statement may already have rolled the transaction back
            if !conn.is_autocommit() {
                conn.execute_batch(sql)?;
            }
            conn.execute_batch("BEGIN;")?;
            Ok(())
        })
    }
}

/// Best-effort cleanup after an engine failure: roll back the open
/// transaction and, in manual-commit mode, open a fresh one.
pub(crate) fn recover(conn: &Connection, auto_commit: bool) {
    if !conn.is_autocommit() {
        warn!("rolling back open transaction after engine failure");
        if let Err(err) = conn.execute_batch("ROLLBACK;") {
            warn!(error = %err, "recovery rollback failed");
            return;
        }
    }
    if !auto_commit {
        if let Err(err) = conn.execute_batch("BEGIN;") {
            warn!(error = %err, "failed to reopen transaction after rollback");
        }
    }
}
