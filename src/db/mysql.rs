use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{MySql, Pool};
use std::time::Duration;

use crate::db::models::Message;
use crate::db::schema::{DELETE_BY_ID, LIST_RECENT, MYSQL_INIT};
use crate::db::store::{MessageStore, finish_delete};
use crate::error::AdminError;

pub type MySqlPool = Pool<MySql>;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct MySqlMessageStore {
    pool: MySqlPool,
}

impl MySqlMessageStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The pool connects on first use, so startup does not wait on the database.
    pub fn connect_lazy(opts: MySqlConnectOptions) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(opts);
        Self::new(pool)
    }
}

#[async_trait]
impl MessageStore for MySqlMessageStore {
    async fn ensure_schema(&self) -> Result<(), AdminError> {
        sqlx::query(MYSQL_INIT).execute(&self.pool).await?;
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
