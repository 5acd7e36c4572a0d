//! Database module: the `posts` table behind the message endpoints.
//!
//! Layout:
//! - `models.rs`: row struct and list envelope
//! - `schema.rs`: DDL and shared DML
//! - `store.rs`: the `MessageStore` trait handlers depend on
//! - `mysql.rs` / `sqlite.rs`: driver-specific implementations

pub mod models;
pub mod mysql;
pub mod schema;
pub mod sqlite;
pub mod store;

use std::sync::Arc;

pub use models::{Message, MessageList};
pub use mysql::MySqlMessageStore;
pub use schema::RECENT_LIMIT;
pub use sqlite::SqliteMessageStore;
pub use store::MessageStore;

use crate::config::DatabaseTarget;
use crate::error::AdminError;

/// Build the store for the configured target without touching the network.
pub fn connect_lazy(target: DatabaseTarget) -> Result<Arc<dyn MessageStore>, AdminError> {
    Ok(match target {
        DatabaseTarget::MySql(opts) => Arc::new(MySqlMessageStore::connect_lazy(opts)),
        DatabaseTarget::Sqlite(url) => Arc::new(SqliteMessageStore::connect_lazy(&url)?),
    })
}
