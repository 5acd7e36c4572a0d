use axum::{
    Json,
    extract::{Path, State},
};

use crate::AdminError;
use crate::db::{MessageList, RECENT_LIMIT};
use crate::router::AdminState;
use crate::types::DeleteConfirmation;

/// GET /api/messages -> the most recent posts, newest first.
pub async fn list_messages(State(state): State<AdminState>) -> Result<Json<MessageList>, AdminError> {
    let rows = state.messages.list_recent(RECENT_LIMIT).await?;
    Ok(Json(rows.into()))
}

/// DELETE /api/messages/{id}
pub async fn delete_message(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteConfirmation>, AdminError> {
    state.messages.delete(id).await?;
    Ok(Json(DeleteConfirmation::new(format!("Deleted message {id}"))))
}
