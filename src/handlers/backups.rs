use axum::{
    Json,
    extract::{Path, State},
};

use crate::middleware::BatchDeleteRequest;
use crate::router::AdminState;
use crate::types::DeleteConfirmation;
use crate::types::backup::{BackupList, BatchDeleteResponse};
use crate::AdminError;

/// GET /api/backups
pub async fn list_backups(State(state): State<AdminState>) -> Result<Json<BackupList>, AdminError> {
    let objects = state.backups()?.list().await?;
    Ok(Json(objects.into()))
}

/// DELETE /api/backups/{name}
pub async fn delete_backup(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteConfirmation>, AdminError> {
    state.backups()?.delete(&name).await?;
    Ok(Json(DeleteConfirmation::new(format!("Deleted backup {name}"))))
}

/// POST /api/backups/delete-batch
///
/// The payload is validated by the extractor before the directory is
/// consulted, so a malformed request never deletes anything. Per-item
/// failures are reported in the body; the batch itself always answers 200.
pub async fn delete_backups_batch(
    State(state): State<AdminState>,
    BatchDeleteRequest(names): BatchDeleteRequest,
) -> Result<Json<BatchDeleteResponse>, AdminError> {
    let directory = state.backups()?;
    let outcome = directory.delete_many(names).await;
    Ok(Json(outcome.into()))
}
