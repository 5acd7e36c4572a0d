use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::MessageStore;
use crate::error::AdminError;
use crate::handlers::{backups, dashboard, messages, status};
use crate::middleware::require_basic_auth;
use crate::service::BackupDirectory;

/// Shared, read-only state. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AdminState {
    pub config: Arc<Config>,
    pub backup_directory: Option<BackupDirectory>,
    pub messages: Arc<dyn MessageStore>,
}

impl AdminState {
    pub fn new(
        config: Config,
        backup_directory: Option<BackupDirectory>,
        messages: Arc<dyn MessageStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            backup_directory,
            messages,
        }
    }

    /// The backup container, or a configuration error when no storage
    /// account was configured.
    pub fn backups(&self) -> Result<&BackupDirectory, AdminError> {
        self.backup_directory
            .as_ref()
            .ok_or(AdminError::StorageNotConfigured)
    }
}

pub fn admin_router(state: AdminState) -> Router {
    let credentials = state.config.admin_credentials();

    let protected = Router::new()
        .route("/", get(dashboard::dashboard_page))
        .route("/api/status", get(status::status_handler))
        .route("/api/backups", get(backups::list_backups))
        .route(
            "/api/backups/delete-batch",
            post(backups::delete_backups_batch),
        )
        .route("/api/backups/{name}", delete(backups::delete_backup))
        .route("/api/messages", get(messages::list_messages))
        .route("/api/messages/{id}", delete(messages::delete_message))
        .route_layer(middleware::from_fn_with_state(
            credentials,
            require_basic_auth,
        ));

    Router::new()
        .route("/healthz", get(status::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
