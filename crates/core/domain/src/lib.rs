pub mod calendar;
pub mod clock;
pub mod data;
pub mod role;

pub use calendar::{normalize_local_date, parse_timestamp_ms};
pub use clock::{Clock, ManualClock, SystemClock};
pub use data::{
    Availability, CapacityAggregate, CapacityRates, CapacityTotals, DepartmentRollup,
    EmployeeRecord, LeaveWindow, PresenceStatus,
};
pub use role::{Role, RoleParseError};

/// 查看者上下文：聚合请求共享的执行上下文。
///
/// 缓存按 `role` 区分，不按 `user_id` 区分；同角色的不同用户共享同一条缓存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContext {
    pub user_id: String,
    pub role: Role,
}

impl ViewerContext {
    /// 构造显式身份与角色的查看者上下文。
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}
