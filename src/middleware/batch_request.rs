use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::AdminError;

/// Names to delete, pulled from a `{"names": [...]}` body.
///
/// Only type and presence are checked: the body must be a JSON object whose
/// `names` field is a non-empty array of strings.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchDeleteRequest(pub Vec<String>);

impl<S> FromRequest<S> for BatchDeleteRequest
where
    S: Send + Sync,
{
    type Rejection = AdminError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await.map_err(|rejection| {
            AdminError::InvalidBatch(format!("invalid request body: {}", rejection.body_text()))
        })?;
        parse_names(&body).map(BatchDeleteRequest)
    }
}

pub fn parse_names(body: &Value) -> Result<Vec<String>, AdminError> {
    let Some(names) = body.get("names") else {
        return Err(AdminError::InvalidBatch("`names` is required".to_string()));
    };
    let Some(items) = names.as_array() else {
        return Err(AdminError::InvalidBatch("`names` must be a list".to_string()));
    };
    if items.is_empty() {
        return Err(AdminError::InvalidBatch(
            "`names` must not be empty".to_string(),
        ));
    }

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                AdminError::InvalidBatch("`names` must contain only strings".to_string())
            })
        })
        .collect()
}
