// ============================
// linkkeeper-backend/src/handlers/mod.rs
// ============================
//! HTTP handlers.

pub mod links;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use linkkeeper_common::ApiResponse;
use serde::Serialize;

/// Wrap an optional payload in the response envelope
pub fn send<T: Serialize>(status: StatusCode, result: Option<T>) -> Response {
    let body = ApiResponse {
        status: status.as_u16(),
        code: None,
        message: None,
        result,
    };
    (status, Json(body)).into_response()
}

/// Liveness check, outside the token gate
pub async fn health() -> Response {
    send(StatusCode::OK, Some("ok"))
}
