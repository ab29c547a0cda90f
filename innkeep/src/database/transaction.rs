//! Write transactions.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Starts an `IMMEDIATE` transaction, taking the write lock up front.
    ///
    /// Reads made through the returned transaction are therefore serialised
    /// with the writes that follow them. Dropping the transaction without
    /// committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock for
    /// longer than the busy timeout, or any other database error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// let rooms = Database::list_rooms(&tx).unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.config.busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| {
                let err = Error::from(e);
                if err.is_lock_timeout() {
                    Error::LockTimeout { seconds }
                } else {
                    err
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::database::DatabaseConfig;
    use tempfile::tempdir;

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(DatabaseConfig::new(dir.path().join("t.db"))).unwrap();

        {
            let tx = db.begin_transaction().unwrap();
            tx.execute(
                "INSERT INTO metadata (key, value) VALUES ('scratch', 'x')",
                [],
            )
            .unwrap();
        }

        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM metadata WHERE key = 'scratch'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_competing_writer_times_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.db");
        let mut holder = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut waiter = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let _held = holder.begin_transaction().unwrap();
        let err = waiter.begin_transaction().unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }
}
