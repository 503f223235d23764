//! Route handlers outside the pricing API

pub mod whatsapp;

use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;

/// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// JSON 404 for unknown paths
pub async fn not_found() -> AppError {
    AppError::NotFound
}
