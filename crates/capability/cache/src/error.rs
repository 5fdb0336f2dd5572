//! 缓存错误类型。

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache lock failed: {0}")]
    Lock(String),
}
