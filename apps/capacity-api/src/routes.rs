//! 路由定义
//!
//! - 健康检查：/health
//! - 容量视图：/api/capacity, /api/capacity/refresh, /api/capacity/employees
//! - 变更信号：/api/capacity/signals
//! - 指标：/metrics

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/api/capacity", get(get_capacity))
        .route("/api/capacity/refresh", post(refresh_capacity))
        .route("/api/capacity/employees", get(list_employees))
        .route("/api/capacity/signals", post(post_signal))
}
