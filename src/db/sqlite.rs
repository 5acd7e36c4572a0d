use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use crate::db::models::Message;
use crate::db::schema::{DELETE_BY_ID, LIST_RECENT, SQLITE_INIT, statements};
use crate::db::store::{MessageStore, finish_delete};
use crate::error::AdminError;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lazily connecting pool; the database file is created on first use.
    pub fn connect_lazy(url: &str) -> Result<Self, AdminError> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(opts);
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn ensure_schema(&self) -> Result<(), AdminError> {
        for stmt in statements(SQLITE_INIT) {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Message>, AdminError> {
        let rows = sqlx::query_as::<_, Message>(LIST_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<(), AdminError> {
        let mut tx = self.pool.begin().await?;
        let affected = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected());
        finish_delete(tx, id, affected).await
    }
}
