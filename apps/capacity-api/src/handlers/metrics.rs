//! 聚合指标快照。
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hr_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            aggregation_passes: snapshot.aggregation_passes,
            aggregation_failures: snapshot.aggregation_failures,
            aggregation_latency_ms_total: snapshot.aggregation_latency_ms_total,
            aggregation_latency_ms_count: snapshot.aggregation_latency_ms_count,
            cache_hits: snapshot.cache_hits,
            cache_misses: snapshot.cache_misses,
            forced_refreshes: snapshot.forced_refreshes,
            change_signals: snapshot.change_signals,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn metrics_endpoint_responds() {
        let response = get_metrics().await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
