use serde::Serialize;

use crate::config::Config;

/// Where application logs end up; reported verbatim.
pub const OBSERVABILITY: &str = "forwarded to Log Analytics";

/// Placeholder status assembled from configuration; nothing here is measured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub mysql: DatabaseStatus,
    pub backup: BackupStatus,
    pub observability: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub endpoint: String,
    pub name: String,
    /// Always 0: lag is not measured.
    pub replication_lag_sec: u64,
    pub last_backup_utc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    pub container: String,
    pub storage_account: Option<String>,
    pub pending_uploads: i64,
}

impl From<&Config> for StatusReport {
    fn from(cfg: &Config) -> Self {
        Self {
            mysql: DatabaseStatus {
                endpoint: cfg.db_endpoint.clone(),
                name: cfg.db_name.clone(),
                replication_lag_sec: 0,
                last_backup_utc: cfg.last_backup_utc.clone(),
            },
            backup: BackupStatus {
                container: cfg.backup_container.clone(),
                storage_account: cfg.storage_account_name.clone(),
                pending_uploads: cfg.pending_uploads,
            },
            observability: OBSERVABILITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_mirrors_configuration() {
        let mut cfg = Config::default();
        cfg.storage_account_name = Some("backupsacct".to_string());
        cfg.last_backup_utc = "2025-01-02T03:04:05Z".to_string();
        cfg.pending_uploads = 2;

        let value = serde_json::to_value(StatusReport::from(&cfg)).unwrap();
        assert_eq!(
            value,
            json!({
                "mysql": {
                    "endpoint": "mysql.internal:3306",
                    "name": "boardapp",
                    "replicationLagSec": 0,
                    "lastBackupUtc": "2025-01-02T03:04:05Z"
                },
                "backup": {
                    "container": "mysql-backup",
                    "storageAccount": "backupsacct",
                    "pendingUploads": 2
                },
                "observability": "forwarded to Log Analytics"
            })
        );
    }
}
