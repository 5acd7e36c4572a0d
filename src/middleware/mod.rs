pub mod auth;
pub mod batch_request;

pub use auth::{AdminCredentials, require_basic_auth};
pub use batch_request::BatchDeleteRequest;
