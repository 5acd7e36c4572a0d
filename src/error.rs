use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

#[derive(Debug, ThisError)]
pub enum AdminError {
    #[error("storage account is not configured (set STORAGE_ACCOUNT_NAME)")]
    StorageNotConfigured,

    #[error("{0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("storage account name is not usable: {0}")]
    InvalidStorageAccount(String),

    #[error("{0}")]
    BlobProperties(#[from] reqwest::Error),

    #[error("backup not found: {0}")]
    BackupNotFound(String),

    #[error("invalid backup name: {0}")]
    InvalidBackupName(String),

    #[error("{0}")]
    Database(#[from] SqlxError),

    #[error("message not found: {0}")]
    MessageNotFound(i64),

    #[error("{0}")]
    InvalidBatch(String),
}

impl AdminError {
    pub fn status(&self) -> StatusCode {
        match self {
            AdminError::BackupNotFound(_) | AdminError::MessageNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AdminError::InvalidBatch(_) | AdminError::InvalidBackupName(_) => {
                StatusCode::BAD_REQUEST
            }
            AdminError::StorageNotConfigured
            | AdminError::InvalidStorageAccount(_)
            | AdminError::ObjectStore(_)
            | AdminError::BlobProperties(_)
            | AdminError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }
        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

/// Error body shared by every JSON endpoint.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(
            AdminError::BackupNotFound("a.sql.gz".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AdminError::MessageNotFound(3).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn malformed_batch_maps_to_400() {
        assert_eq!(
            AdminError::InvalidBatch("names is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AdminError::InvalidBackupName("a//b".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn external_failures_map_to_500() {
        assert_eq!(
            AdminError::StorageNotConfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AdminError::Database(SqlxError::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn body_carries_the_error_message() {
        let resp = AdminError::MessageNotFound(42).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["error"], "message not found: 42");
    }
}
