use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(60);

/// 视图选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// 挂载时是否立即加载（缓存新鲜时直接使用缓存）。
    pub auto_fetch: bool,
    /// 定时刷新周期，挂载期间持续生效。
    pub refresh_interval: Duration,
    /// 判断缓存是否新鲜的时间窗口。
    pub cache_timeout: Duration,
    /// 为 false 时发布的结果不含员工明细。
    pub include_employee_details: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            auto_fetch: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            include_employee_details: true,
        }
    }
}
