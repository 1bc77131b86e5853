//! Transaction Management
//!
//! Scoped transactions: a [`Transaction`] commits only when told to. Every
//! other exit path (an early `?` return, a panic, a dropped future) drops it,
//! and dropping an uncommitted transaction rolls it back.

use crate::error::{ModelError, ModelResult};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction as SqlxTransaction};
use tracing::{debug, warn};

/// High-level transaction wrapper with automatic rollback
pub struct Transaction {
    inner: Option<SqlxTransaction<'static, Sqlite>>,
}

impl Transaction {
    /// Begin a new transaction on a pooled connection
    pub async fn begin(pool: &SqlitePool) -> ModelResult<Transaction> {
        debug!("Beginning transaction");

        let tx = pool
            .begin()
            .await
            .map_err(|e| ModelError::Transaction(format!("Failed to begin transaction: {}", e)))?;

        Ok(Transaction {
            inner: Some(tx),
        })
    }

    /// Connection to run statements against inside this transaction
    pub fn connection(&mut self) -> ModelResult<&mut SqliteConnection> {
        match self.inner.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err(ModelError::Transaction(
                "Transaction has already been consumed".to_string(),
            )),
        }
    }

    /// Commit the transaction
    pub async fn commit(mut self) -> ModelResult<()> {
        if let Some(tx) = self.inner.take() {
            tx.commit()
                .await
                .map_err(|e| ModelError::Transaction(format!("Failed to commit transaction: {}", e)))?;
            debug!("Transaction committed");
            Ok(())
        } else {
            Err(ModelError::Transaction(
                "Transaction has already been consumed".to_string(),
            ))
        }
    }

    /// Roll the transaction back explicitly
    pub async fn rollback(mut self) -> ModelResult<()> {
        if let Some(tx) = self.inner.take() {
            tx.rollback().await.map_err(|e| {
                ModelError::Transaction(format!("Failed to rollback transaction: {}", e))
            })?;
            debug!("Transaction rolled back");
            Ok(())
        } else {
            Err(ModelError::Transaction(
                "Transaction has already been consumed".to_string(),
            ))
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        // sqlx queues the ROLLBACK in its own Drop; we only report it.
        if self.inner.take().is_some() {
            warn!("Transaction dropped without commit; rolling back");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn notes_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.ensure_schema(&["CREATE TABLE IF NOT EXISTS notes (id INTEGER PRIMARY KEY, text TEXT NOT NULL UNIQUE)"])
            .await
            .unwrap();
        db
    }

    async fn count_notes(db: &Database) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(db.pool())
            .await
            .unwrap();
        row.0
    }

    #[tokio::test]
    async fn test_commit_persists() {
        let db = notes_db().await;

        let mut tx = db.begin().await.unwrap();
        sqlx::query("INSERT INTO notes (text) VALUES ('kept')")
            .execute(tx.connection().unwrap())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(count_notes(&db).await, 1);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = notes_db().await;

        {
            let mut tx = db.begin().await.unwrap();
            sqlx::query("INSERT INTO notes (text) VALUES ('discarded')")
                .execute(tx.connection().unwrap())
                .await
                .unwrap();
        }

        assert_eq!(count_notes(&db).await, 0);
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = notes_db().await;

        let mut tx = db.begin().await.unwrap();
        sqlx::query("INSERT INTO notes (text) VALUES ('undone')")
            .execute(tx.connection().unwrap())
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(count_notes(&db).await, 0);
    }

    #[tokio::test]
    async fn test_unique_violation_is_classified() {
        let db = notes_db().await;

        sqlx::query("INSERT INTO notes (text) VALUES ('same')")
            .execute(db.pool())
            .await
            .unwrap();

        let mut tx = db.begin().await.unwrap();
        let err: ModelError = sqlx::query("INSERT INTO notes (text) VALUES ('same')")
            .execute(tx.connection().unwrap())
            .await
            .unwrap_err()
            .into();
        drop(tx);

        assert!(err.is_unique_violation_on("text"));
        assert_eq!(count_notes(&db).await, 1);
    }
}
