//! # 容量视图
//!
//! 把聚合器、缓存与变更总线组合成一个可挂载的数据源，供仪表盘一类的视图使用。
//!
//! ## 生命周期
//!
//! - 挂载：`auto_fetch` 时先加载一次（缓存新鲜则不触发聚合）
//! - 挂载期间：每个 `refresh_interval` 加载一次；总线上的相关变更强制刷新
//! - 卸载：停止定时器与事件监听；进行中的聚合不会被取消，但其结果不再更新视图
//!
//! 状态变化通过 `tokio::sync::watch` 广播，订阅方拿到的永远是最新快照。

pub mod feed;
pub mod options;
pub mod state;

pub use feed::{CapacityFeed, FeedHandle};
pub use options::{DEFAULT_CACHE_TIMEOUT, DEFAULT_REFRESH_INTERVAL, FeedOptions};
pub use state::{FeedPhase, FeedSnapshot};
