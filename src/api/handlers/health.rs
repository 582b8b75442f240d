/*
 * Responsibility
 * - GET / (service banner) and GET /health (liveness)
 * - both still pass through content negotiation
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"message": "Expense Tracker API running"})),
    )
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
