//! HTTP 响应辅助函数和 DTO 转换
//!
//! 所有错误返回统一的 ApiResponse 格式，HTTP 状态码与错误码对应。

use api_contract::{ApiResponse, CapacitySnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hr_feed::FeedSnapshot;

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 禁止访问错误响应
pub fn forbidden_error(code: &str, message: impl Into<String>) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error(code, message.into())),
    )
        .into_response()
}

/// FeedSnapshot 转 CapacitySnapshotDto
pub fn snapshot_to_dto(snapshot: FeedSnapshot) -> CapacitySnapshotDto {
    CapacitySnapshotDto {
        phase: snapshot.phase.as_str().to_string(),
        is_refreshing: snapshot.is_refreshing,
        capacity: snapshot.capacity.as_ref().clone(),
    }
}
