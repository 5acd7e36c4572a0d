use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("dashboard.html");

/// GET / -> static page; its script calls the JSON endpoints with the
/// browser's cached Basic credentials.
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
