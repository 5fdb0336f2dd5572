//! 视图状态。

use domain::CapacityAggregate;
use serde::Serialize;
use std::sync::Arc;

/// 视图阶段：`idle -> loading -> {ready, error}`，`unmounted` 为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPhase {
    Idle,
    Loading,
    Ready,
    Error,
    Unmounted,
}

impl FeedPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedPhase::Idle => "idle",
            FeedPhase::Loading => "loading",
            FeedPhase::Ready => "ready",
            FeedPhase::Error => "error",
            FeedPhase::Unmounted => "unmounted",
        }
    }
}

/// 视图当前可见的全部状态。
///
/// `is_refreshing` 表示有聚合正在进行（可能同时展示旧数据）；
/// `capacity.is_loading` 只表示“还没有任何数据”。
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub phase: FeedPhase,
    pub is_refreshing: bool,
    pub capacity: Arc<CapacityAggregate>,
}

impl FeedSnapshot {
    pub fn initial() -> Self {
        Self {
            phase: FeedPhase::Idle,
            is_refreshing: false,
            capacity: Arc::new(CapacityAggregate::loading()),
        }
    }
}
