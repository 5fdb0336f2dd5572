//! 追踪、请求 ID 与聚合计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub aggregation_passes: u64,
    pub aggregation_failures: u64,
    pub aggregation_latency_ms_total: u64,
    pub aggregation_latency_ms_count: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub forced_refreshes: u64,
    pub change_signals: u64,
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    aggregation_passes: AtomicU64,
    aggregation_failures: AtomicU64,
    aggregation_latency_ms_total: AtomicU64,
    aggregation_latency_ms_count: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    forced_refreshes: AtomicU64,
    change_signals: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            aggregation_passes: AtomicU64::new(0),
            aggregation_failures: AtomicU64::new(0),
            aggregation_latency_ms_total: AtomicU64::new(0),
            aggregation_latency_ms_count: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            forced_refreshes: AtomicU64::new(0),
            change_signals: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            aggregation_passes: self.aggregation_passes.load(Ordering::Relaxed),
            aggregation_failures: self.aggregation_failures.load(Ordering::Relaxed),
            aggregation_latency_ms_total: self.aggregation_latency_ms_total.load(Ordering::Relaxed),
            aggregation_latency_ms_count: self.aggregation_latency_ms_count.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            forced_refreshes: self.forced_refreshes.load(Ordering::Relaxed),
            change_signals: self.change_signals.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录一次成功的聚合。
pub fn record_aggregation_pass(latency_ms: u64) {
    let metrics = metrics();
    metrics.aggregation_passes.fetch_add(1, Ordering::Relaxed);
    metrics
        .aggregation_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .aggregation_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录一次失败的聚合。
pub fn record_aggregation_failure() {
    metrics().aggregation_failures.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cache_hit() {
    metrics().cache_hits.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cache_miss() {
    metrics().cache_misses.fetch_add(1, Ordering::Relaxed);
}

/// 记录强制刷新（手动刷新或变更信号）。
pub fn record_forced_refresh() {
    metrics().forced_refreshes.fetch_add(1, Ordering::Relaxed);
}

/// 记录收到的变更信号。
pub fn record_change_signal() {
    metrics().change_signals.fetch_add(1, Ordering::Relaxed);
}
