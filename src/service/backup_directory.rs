use futures::{StreamExt, TryStreamExt, stream};
use object_store::{
    ObjectMeta, ObjectStore, azure::MicrosoftAzureBuilder, path::Path as ObjectPath,
};
use std::sync::Arc;
use tracing::info;

use super::blob_properties::{AzureBlobProperties, CreationTimes};
use crate::config::Config;
use crate::error::AdminError;
use crate::types::backup::{BackupObject, BatchDeleteOutcome, sort_newest_first};

/// List/delete access to the single backup container.
#[derive(Clone)]
pub struct BackupDirectory {
    store: Arc<dyn ObjectStore>,
    container: Arc<str>,
    creation_times: Option<Arc<dyn CreationTimes>>,
}

impl BackupDirectory {
    pub fn new(store: Arc<dyn ObjectStore>, container: &str) -> Self {
        Self {
            store,
            container: Arc::from(container),
            creation_times: None,
        }
    }

    pub fn with_creation_times(mut self, lookup: Arc<dyn CreationTimes>) -> Self {
        self.creation_times = Some(lookup);
        self
    }

    /// Azure Blob container keyed by account name. Credentials come from the
    /// `AZURE_*` environment when present, otherwise the managed identity.
    pub fn azure(account: &str, container: &str) -> Result<Self, AdminError> {
        let store = MicrosoftAzureBuilder::from_env()
            .with_account(account)
            .with_container_name(container)
            .build()?;
        let properties =
            AzureBlobProperties::new(account, container, store.credentials().clone())?;
        Ok(Self::new(Arc::new(store), container).with_creation_times(Arc::new(properties)))
    }

    /// `Ok(None)` when no storage account is configured.
    pub fn from_config(cfg: &Config) -> Result<Option<Self>, AdminError> {
        cfg.storage_account_name
            .as_deref()
            .map(|account| Self::azure(account, &cfg.backup_container))
            .transpose()
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub async fn list(&self) -> Result<Vec<BackupObject>, AdminError> {
        let listed: Vec<ObjectMeta> = self.store.list(None).try_collect().await?;
        let mut objects = Vec::with_capacity(listed.len());
        for meta in listed {
            let created = match &self.creation_times {
                Some(lookup) => lookup.creation_time(&meta.location).await?,
                None => None,
            };
            objects.push(BackupObject::from(meta).with_creation_time(created));
        }
        sort_newest_first(&mut objects);
        Ok(objects)
    }

    /// `name` is taken exactly as `list` reports it.
    pub async fn delete(&self, name: &str) -> Result<(), AdminError> {
        let path = backup_path(name)?;
        self.store
            .head(&path)
            .await
            .map_err(|e| not_found_as(name, e))?;
        self.store
            .delete(&path)
            .await
            .map_err(|e| not_found_as(name, e))?;
        info!(container = %self.container, object = %name, "deleted backup");
        Ok(())
    }

    /// Attempts every name in order; one failure never stops the rest.
    pub async fn delete_many(&self, names: Vec<String>) -> BatchDeleteOutcome {
        let outcome = stream::iter(names)
            .then(|name| async move {
                let result = self.delete(&name).await;
                (name, result)
            })
            .fold(BatchDeleteOutcome::default(), |mut acc, (name, result)| async move {
                acc.record(name, result);
                acc
            })
            .await;
        info!(
            container = %self.container,
            deleted = outcome.deleted.len(),
            failed = outcome.failed.len(),
            "batch delete finished"
        );
        outcome
    }
}

/// Listed names are already in stored form, so they are parsed rather than
/// encoded a second time.
fn backup_path(name: &str) -> Result<ObjectPath, AdminError> {
    ObjectPath::parse(name).map_err(|e| AdminError::InvalidBackupName(format!("{name} ({e})")))
}

fn not_found_as(name: &str, err: object_store::Error) -> AdminError {
    match err {
        object_store::Error::NotFound { .. } => AdminError::BackupNotFound(name.to_string()),
        other => AdminError::ObjectStore(other),
    }
}
