pub mod backup;
pub mod status;

use serde::Serialize;

/// Body returned by the single-item delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub success: bool,
    pub message: String,
}

impl DeleteConfirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
