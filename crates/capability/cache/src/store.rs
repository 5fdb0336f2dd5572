//! 缓存存储接口。

use crate::error::CacheError;
use async_trait::async_trait;
use domain::CapacityAggregate;
use std::sync::Arc;

/// 缓存条目：聚合结果 + 写入时间 + 计算时所用的键（角色）。
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub value: Arc<CapacityAggregate>,
    pub written_at_ms: i64,
}

/// 缓存存储接口。
///
/// 只负责存取，过期判定由 [`crate::AggregationCache`] 完成。
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 读取指定键的条目
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// 写入条目（覆盖）
    async fn set(
        &self,
        key: &str,
        value: Arc<CapacityAggregate>,
        written_at_ms: i64,
    ) -> Result<(), CacheError>;
}
