use async_trait::async_trait;
use sqlx::{Database, Error as SqlxError, Transaction};
use tracing::{info, warn};

use crate::db::models::Message;
use crate::error::AdminError;

/// Narrow view of the `posts` table used by the HTTP handlers.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Create the table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), AdminError>;

    /// Up to `limit` rows ordered by `created_at` descending.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Message>, AdminError>;

    /// Delete one row in its own transaction.
    /// Returns [`AdminError::MessageNotFound`] when no row matched.
    async fn delete(&self, id: i64) -> Result<(), AdminError>;
}

/// Settle a single-row delete transaction from the rows-affected result:
/// commit on one hit, roll back on zero rows or on an execution error.
pub(crate) async fn finish_delete<DB: Database>(
    tx: Transaction<'_, DB>,
    id: i64,
    affected: Result<u64, SqlxError>,
) -> Result<(), AdminError> {
    match affected {
        Ok(0) => {
            tx.rollback().await?;
            Err(AdminError::MessageNotFound(id))
        }
        Ok(_) => {
            tx.commit().await?;
            info!(id, "deleted message");
            Ok(())
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(id, error = %rollback_err, "rollback after failed delete also failed");
            }
            Err(e.into())
        }
    }
}
