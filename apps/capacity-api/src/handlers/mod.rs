//! Handlers 模块

pub mod capacity;
pub mod metrics;
pub mod signals;

#[cfg(test)]
pub(crate) mod test_support;

pub use capacity::*;
pub use metrics::*;
pub use signals::*;

use axum::{Json, response::IntoResponse};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}
