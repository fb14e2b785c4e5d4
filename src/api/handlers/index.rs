/*
 * Responsibility
 * - GET /        landing page (HTML)
 * - GET /status  liveness text
 */
use axum::response::Html;

pub const LANDING_PAGE: &str = "<h1>AlgoVisualizer Backend</h1> <br> <h3> Status: Running </h3>";
pub const STATUS_TEXT: &str = "Hey, backend is running";

pub async fn home() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

pub async fn status() -> &'static str {
    STATUS_TEXT
}
