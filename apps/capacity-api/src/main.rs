//! 容量数据 HTTP 服务：挂载配置中查看者的容量视图，并暴露快照、刷新与变更信号接口。

mod handlers;
mod routes;
mod utils;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
};
use domain::{Clock, SystemClock};
use hr_aggregator::CapacityAggregator;
use hr_cache::AggregationCache;
use hr_config::AppConfig;
use hr_events::EventBus;
use hr_feed::{CapacityFeed, FeedOptions};
use hr_gateway::{HttpGateway, HttpGatewayConfig};
use hr_telemetry::{init_tracing, new_request_ids};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{Instrument, info};

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<CapacityFeed>,
    pub bus: EventBus,
    pub clock: Arc<dyn Clock>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let gateway = Arc::new(HttpGateway::new(HttpGatewayConfig {
        base_url: config.gateway_url.clone(),
        token: config.gateway_token.clone(),
        timeout: config.gateway_timeout(),
    })?);
    let cache = AggregationCache::in_memory(clock.clone(), config.cache_timeout());
    let aggregator = CapacityAggregator::new(gateway, cache);
    let feed = Arc::new(CapacityFeed::new(
        aggregator,
        config.viewer(),
        feed_options(&config),
    ));
    let bus = EventBus::new(config.event_bus_capacity);

    // 服务存活期间保持挂载
    let _feed_handle = feed.mount(&bus);

    let state = AppState { feed, bus, clock };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(
        target: "hr.api",
        addr = %config.http_addr,
        role = %config.viewer_role,
        "capacity api listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// 从运行配置中取出视图选项。
pub fn feed_options(config: &AppConfig) -> FeedOptions {
    FeedOptions {
        auto_fetch: config.auto_fetch,
        refresh_interval: config.refresh_interval(),
        cache_timeout: config.cache_timeout(),
        include_employee_details: config.include_employee_details,
    }
}

fn build_app(state: AppState) -> Router {
    routes::create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(middleware::from_fn(request_context))
}

async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    // 生成 request_id 与 trace_id，并注入请求扩展与日志
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::test_state;
    use axum::http::StatusCode;
    use domain::Role;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    #[test]
    fn feed_options_follow_config() {
        let config = AppConfig {
            http_addr: "127.0.0.1:0".to_string(),
            gateway_url: "http://gateway".to_string(),
            gateway_token: None,
            gateway_timeout_ms: 1_000,
            viewer_role: Role::Manager,
            viewer_id: "u-1".to_string(),
            cache_timeout_ms: 5_000,
            refresh_interval_ms: 2_000,
            auto_fetch: false,
            include_employee_details: false,
            event_bus_capacity: 4,
        };
        let options = feed_options(&config);
        assert!(!options.auto_fetch);
        assert!(!options.include_employee_details);
        assert_eq!(options.refresh_interval, Duration::from_millis(2_000));
        assert_eq!(options.cache_timeout, Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn router_adds_request_ids() {
        let (state, _gateway) = test_state(FeedOptions::default());
        let app = build_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key("x-trace-id"));

        let body = response.into_body().collect().await.expect("body").to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn router_rejects_unknown_status_filter() {
        let (state, _gateway) = test_state(FeedOptions::default());
        let app = build_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/capacity/employees?status=sleeping")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
