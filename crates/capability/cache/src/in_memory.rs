//! 单槽内存缓存。
//!
//! 整个进程只保存一条记录，后写覆盖先写；键不一致即视为未命中，不做显式淘汰。

use crate::error::CacheError;
use crate::store::{CacheEntry, CacheStore};
use async_trait::async_trait;
use domain::CapacityAggregate;
use std::sync::{Arc, RwLock};

#[derive(Default)]
pub struct InMemoryCacheStore {
    slot: RwLock<Option<CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前槽位中的键（用于测试）。
    pub fn current_key(&self) -> Option<String> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|entry| entry.key.clone()))
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| CacheError::Lock("read".to_string()))?;
        Ok(slot.as_ref().filter(|entry| entry.key == key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: Arc<CapacityAggregate>,
        written_at_ms: i64,
    ) -> Result<(), CacheError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| CacheError::Lock("write".to_string()))?;
        *slot = Some(CacheEntry {
            key: key.to_string(),
            value,
            written_at_ms,
        });
        Ok(())
    }
}
