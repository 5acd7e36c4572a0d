use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `posts` table, returned verbatim by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Message {
    pub id: i64,
    pub author: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
    pub count: usize,
}

impl From<Vec<Message>> for MessageList {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            count: messages.len(),
            messages,
        }
    }
}
