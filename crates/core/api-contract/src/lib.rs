//! 稳定的 DTO 与 API 响应契约。
//!
//! - `gateway`：远端 HR 网关返回的报文结构（宽松解析）
//! - 本文件：对外 HTTP 接口的响应封装与 DTO

pub mod gateway;

pub use gateway::{
    DepartmentField, FlexId, FlexText, GatewayEnvelope, ListPayload, RawEmployee,
    RawLeaveRequest, TolerantList,
};

use domain::{CapacityAggregate, EmployeeRecord};
use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 容量快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySnapshotDto {
    pub phase: String,
    pub is_refreshing: bool,
    pub capacity: CapacityAggregate,
}

/// 员工列表筛选参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    pub status: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub available_only: bool,
}

/// 员工列表返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListDto {
    pub total: usize,
    pub items: Vec<EmployeeRecord>,
}

/// 变更信号受理结果。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSignalAcceptedDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub relevant: bool,
    pub delivered: usize,
}

/// 变更信号请求体（`{type, ...}`）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSignalRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub detail: serde_json::Map<String, serde_json::Value>,
}

/// 指标快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub aggregation_passes: u64,
    pub aggregation_failures: u64,
    pub aggregation_latency_ms_total: u64,
    pub aggregation_latency_ms_count: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub forced_refreshes: u64,
    pub change_signals: u64,
}
