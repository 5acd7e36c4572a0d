use chrono::{DateTime, Utc};
use object_store::ObjectMeta;
use serde::Serialize;

/// One object in the backup container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupObject {
    pub name: String,
    pub size: u64,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl From<ObjectMeta> for BackupObject {
    fn from(meta: ObjectMeta) -> Self {
        Self {
            name: meta.location.to_string(),
            size: meta.size,
            creation_time: None,
            last_modified: Some(meta.last_modified),
        }
    }
}

impl BackupObject {
    /// Listings carry no creation time; it is looked up per object.
    pub fn with_creation_time(mut self, creation_time: Option<DateTime<Utc>>) -> Self {
        self.creation_time = creation_time;
        self
    }
}

/// Newest first. Objects with no last-modified time go after all that have one.
pub fn sort_newest_first(objects: &mut [BackupObject]) {
    objects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
}

#[derive(Debug, Serialize)]
pub struct BackupList {
    pub backups: Vec<BackupObject>,
    pub count: usize,
}

impl From<Vec<BackupObject>> for BackupList {
    fn from(backups: Vec<BackupObject>) -> Self {
        Self {
            count: backups.len(),
            backups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedDelete {
    pub name: String,
    pub error: String,
}

/// Per-item results of a batch delete.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchDeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<FailedDelete>,
}

impl BatchDeleteOutcome {
    pub fn record<E: std::fmt::Display>(&mut self, name: String, result: Result<(), E>) {
        match result {
            Ok(()) => self.deleted.push(name),
            Err(e) => self.failed.push(FailedDelete {
                name,
                error: e.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteResponse {
    pub success: bool,
    pub deleted: Vec<String>,
    pub deleted_count: usize,
    pub failed: Vec<FailedDelete>,
    pub failed_count: usize,
}

impl From<BatchDeleteOutcome> for BatchDeleteResponse {
    fn from(outcome: BatchDeleteOutcome) -> Self {
        Self {
            success: true,
            deleted_count: outcome.deleted.len(),
            failed_count: outcome.failed.len(),
            deleted: outcome.deleted,
            failed: outcome.failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn object(name: &str, modified: Option<i64>) -> BackupObject {
        BackupObject {
            name: name.to_string(),
            size: 1,
            creation_time: None,
            last_modified: modified.map(|secs| Utc.timestamp_opt(secs, 0).unwrap()),
        }
    }

    #[test]
    fn sorts_by_last_modified_descending() {
        let mut objects = vec![
            object("old", Some(100)),
            object("new", Some(300)),
            object("mid", Some(200)),
        ];
        sort_newest_first(&mut objects);
        let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["new", "mid", "old"]);
    }

    #[test]
    fn missing_last_modified_sorts_last() {
        let mut objects = vec![
            object("unknown", None),
            object("old", Some(100)),
            object("new", Some(300)),
        ];
        sort_newest_first(&mut objects);
        let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["new", "old", "unknown"]);
    }

    #[test]
    fn outcome_keeps_going_past_failures() {
        let mut outcome = BatchDeleteOutcome::default();
        outcome.record("a".into(), Ok::<(), String>(()));
        outcome.record("b".into(), Err("gone".to_string()));
        outcome.record("c".into(), Ok::<(), String>(()));

        assert_eq!(outcome.deleted, ["a", "c"]);
        assert_eq!(
            outcome.failed,
            [FailedDelete {
                name: "b".into(),
                error: "gone".into()
            }]
        );
    }

    #[test]
    fn batch_response_uses_camel_case_counts() {
        let mut outcome = BatchDeleteOutcome::default();
        outcome.record("a".into(), Ok::<(), String>(()));
        outcome.record("b".into(), Err("boom".to_string()));

        let value = serde_json::to_value(BatchDeleteResponse::from(outcome)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "deleted": ["a"],
                "deletedCount": 1,
                "failed": [{"name": "b", "error": "boom"}],
                "failedCount": 1
            })
        );
    }
}
