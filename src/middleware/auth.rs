use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use headers::authorization::Basic;
use headers::{Authorization, HeaderMapExt};
use std::fmt;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

pub const BASIC_CHALLENGE: &str = r#"Basic realm="Admin""#;

/// Expected Basic Auth username/password pair.
#[derive(Clone)]
pub struct AdminCredentials {
    username: Arc<str>,
    password: Arc<str>,
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Arc::from(username),
            password: Arc::from(password),
        }
    }

    /// Exact match on both halves, compared in constant time.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Check the `Authorization: Basic` header against the expected pair.
/// A missing or undecodable header is treated the same as a mismatch.
pub fn ensure_authorized(headers: &HeaderMap, expected: &AdminCredentials) -> Result<(), Response> {
    match headers.typed_get::<Authorization<Basic>>() {
        Some(Authorization(basic)) if expected.matches(basic.username(), basic.password()) => {
            Ok(())
        }
        Some(_) => {
            debug!("basic auth credentials rejected");
            Err(challenge())
        }
        None => {
            debug!("basic auth header missing or malformed");
            Err(challenge())
        }
    }
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
        "authentication required",
    )
        .into_response()
}

/// Middleware gate for every protected route. Layer it with
/// `axum::middleware::from_fn_with_state(credentials, require_basic_auth)`.
pub async fn require_basic_auth(
    State(expected): State<AdminCredentials>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(rejection) = ensure_authorized(req.headers(), &expected) {
        return rejection;
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::{Router, body::Body, middleware, routing::get};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn creds() -> AdminCredentials {
        AdminCredentials::new("admin", "s3cret")
    }

    fn basic(user: &str, pass: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.typed_insert(Authorization::basic(user, pass));
        headers
    }

    #[test]
    fn accepts_exact_pair() {
        assert!(ensure_authorized(&basic("admin", "s3cret"), &creds()).is_ok());
    }

    #[test]
    fn rejects_wrong_password_and_wrong_user() {
        assert!(ensure_authorized(&basic("admin", "s3cret!"), &creds()).is_err());
        assert!(ensure_authorized(&basic("Admin", "s3cret"), &creds()).is_err());
        assert!(ensure_authorized(&basic("", ""), &creds()).is_err());
    }

    #[test]
    fn rejects_missing_and_non_basic_headers() {
        assert!(ensure_authorized(&HeaderMap::new(), &creds()).is_err());

        let mut bearer = HeaderMap::new();
        bearer.insert(header::AUTHORIZATION, "Bearer s3cret".parse().unwrap());
        assert!(ensure_authorized(&bearer, &creds()).is_err());

        let mut garbage = HeaderMap::new();
        garbage.insert(header::AUTHORIZATION, "Basic !!!not-base64".parse().unwrap());
        assert!(ensure_authorized(&garbage, &creds()).is_err());
    }

    #[test]
    fn rejection_carries_basic_challenge() {
        let resp = ensure_authorized(&HeaderMap::new(), &creds()).unwrap_err();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_CHALLENGE
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", creds());
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }

    #[tokio::test]
    async fn middleware_short_circuits_before_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new()
            .route(
                "/protected",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(creds(), require_basic_auth));

        let denied = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let mut req = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();
        req.headers_mut()
            .typed_insert(Authorization::basic("admin", "s3cret"));
        let allowed = app.oneshot(req).await.unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
