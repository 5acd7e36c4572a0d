use async_trait::async_trait;
use chrono::{DateTime, Utc};
use object_store::{
    CredentialProvider,
    azure::{AzureCredential, AzureCredentialProvider},
    path::Path as ObjectPath,
};
use reqwest::Url;

use crate::error::AdminError;

/// Blob service REST version; bearer tokens need 2017-11-09 or later.
const AZURE_API_VERSION: &str = "2023-11-03";
const CREATION_TIME_HEADER: &str = "x-ms-creation-time";

/// Per-object properties the listing itself does not carry.
#[async_trait]
pub trait CreationTimes: Send + Sync {
    /// `Ok(None)` when the backend cannot report a creation time for `path`.
    async fn creation_time(&self, path: &ObjectPath) -> Result<Option<DateTime<Utc>>, AdminError>;
}

/// Reads `x-ms-creation-time` from a Get Blob Properties (`HEAD`) call,
/// authenticated with the same credential the object store resolved.
pub struct AzureBlobProperties {
    http_client: reqwest::Client,
    credentials: AzureCredentialProvider,
    container_url: Url,
}

impl AzureBlobProperties {
    pub fn new(
        account: &str,
        container: &str,
        credentials: AzureCredentialProvider,
    ) -> Result<Self, AdminError> {
        Ok(Self {
            http_client: reqwest::Client::new(),
            credentials,
            container_url: container_url(account, container)?,
        })
    }

    fn blob_url(&self, path: &ObjectPath) -> Url {
        blob_url(&self.container_url, path)
    }
}

#[async_trait]
impl CreationTimes for AzureBlobProperties {
    async fn creation_time(&self, path: &ObjectPath) -> Result<Option<DateTime<Utc>>, AdminError> {
        let credential = self.credentials.get_credential().await?;
        let request = self
            .http_client
            .head(self.blob_url(path))
            .header("x-ms-version", AZURE_API_VERSION)
            .header(
                "x-ms-date",
                Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            );
        let request = match credential.as_ref() {
            AzureCredential::BearerToken(token) => request.bearer_auth(token),
            AzureCredential::SASToken(pairs) => request.query(pairs),
            // Shared-key requests need a signed canonical string; report unknown.
            _ => return Ok(None),
        };

        let resp = request.send().await?;
        // Deleted between the listing and this call.
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;
        Ok(resp
            .headers()
            .get(CREATION_TIME_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_creation_time))
    }
}

fn container_url(account: &str, container: &str) -> Result<Url, AdminError> {
    let mut url = Url::parse(&format!("https://{account}.blob.core.windows.net"))
        .map_err(|e| AdminError::InvalidStorageAccount(format!("{account}: {e}")))?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(container);
    }
    Ok(url)
}

/// The raw blob name is the path's string form; each segment is
/// percent-encoded once on the way into the URL.
fn blob_url(container_url: &Url, path: &ObjectPath) -> Url {
    let mut url = container_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.extend(path.parts());
    }
    url
}

/// RFC 1123 (`Mon, 15 Jan 2024 10:00:00 GMT`), as Azure sends it.
pub fn parse_creation_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
