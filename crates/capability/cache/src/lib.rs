//! # 聚合缓存
//!
//! 保存最近一次容量聚合结果，供所有订阅方共享。
//!
//! - 按角色作为键，不按用户：同角色的用户共享同一条缓存
//! - 命中条件：键一致且 `now - written_at < timeout`
//! - 只按时间过期，不主动淘汰；聚合失败不会清除已有条目
//! - 存储后端与时钟均显式注入，测试可替换

pub mod error;
pub mod in_memory;
pub mod store;

pub use error::CacheError;
pub use in_memory::InMemoryCacheStore;
pub use store::{CacheEntry, CacheStore};

use domain::{CapacityAggregate, Clock, Role};
use hr_telemetry::{record_cache_hit, record_cache_miss};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 默认过期时间（60 秒）。
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(60);

/// 带过期策略的聚合缓存。
#[derive(Clone)]
pub struct AggregationCache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl AggregationCache {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            store,
            clock,
            timeout,
        }
    }

    /// 使用单槽内存存储。
    pub fn in_memory(clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self::new(Arc::new(InMemoryCacheStore::new()), clock, timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// 读取未过期的聚合结果。
    pub async fn read(&self, role: Role) -> Option<Arc<CapacityAggregate>> {
        self.read_within(role, self.timeout).await
    }

    /// 按调用方指定的过期时间读取。
    pub async fn read_within(
        &self,
        role: Role,
        timeout: Duration,
    ) -> Option<Arc<CapacityAggregate>> {
        match self.store.get(role.as_str()).await {
            Ok(Some(entry)) if self.is_fresh(&entry, timeout) => {
                record_cache_hit();
                debug!(target: "hr.cache", role = %role, "cache_hit");
                Some(entry.value)
            }
            Ok(_) => {
                record_cache_miss();
                debug!(target: "hr.cache", role = %role, "cache_miss");
                None
            }
            Err(err) => {
                record_cache_miss();
                warn!(target: "hr.cache", role = %role, "cache read failed: {}", err);
                None
            }
        }
    }

    /// 读取该角色最近一次写入的结果，不论是否过期。
    pub async fn peek(&self, role: Role) -> Option<Arc<CapacityAggregate>> {
        match self.store.get(role.as_str()).await {
            Ok(entry) => entry.map(|entry| entry.value),
            Err(err) => {
                warn!(target: "hr.cache", role = %role, "cache peek failed: {}", err);
                None
            }
        }
    }

    /// 写入聚合结果，时间戳取当前时钟。
    pub async fn write(&self, role: Role, value: Arc<CapacityAggregate>) {
        let now_ms = self.clock.now_ms();
        if let Err(err) = self.store.set(role.as_str(), value, now_ms).await {
            warn!(target: "hr.cache", role = %role, "cache write failed: {}", err);
        }
    }

    fn is_fresh(&self, entry: &CacheEntry, timeout: Duration) -> bool {
        let age_ms = self.clock.now_ms().saturating_sub(entry.written_at_ms);
        i128::from(age_ms) < timeout.as_millis() as i128
    }
}
