use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 员工当日在岗状态。
///
/// 聚合过程只会产出 `Present` 与 `OnLeave`；`Remote`、`Offline` 仅在网关直接上报时出现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresenceStatus {
    Present,
    OnLeave,
    Remote,
    Offline,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Present => "present",
            PresenceStatus::OnLeave => "on-leave",
            PresenceStatus::Remote => "remote",
            PresenceStatus::Offline => "offline",
        }
    }

    /// 是否可用（在岗或远程）。
    pub fn is_available(&self) -> bool {
        matches!(self, PresenceStatus::Present | PresenceStatus::Remote)
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresenceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(PresenceStatus::Present),
            "on-leave" | "on_leave" => Ok(PresenceStatus::OnLeave),
            "remote" => Ok(PresenceStatus::Remote),
            "offline" => Ok(PresenceStatus::Offline),
            _ => Err(format!("unknown presence status: {}", value)),
        }
    }
}

/// 单次聚合产出的员工记录（构造后不再修改）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub status: PresenceStatus,
    pub is_available: bool,
    pub last_active_ms: i64,
}

/// 已批准请假的日期区间（两端都包含）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveWindow {
    pub employee_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LeaveWindow {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// 部门汇总。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRollup {
    pub name: String,
    pub total: usize,
    pub present: usize,
    pub on_leave: usize,
    pub attendance_rate: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityTotals {
    pub total_employees: usize,
    pub present_today: usize,
    pub absent_today: usize,
    pub on_leave_today: usize,
    pub working_remotely: usize,
}

/// 百分比指标，取值 0..=100。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRates {
    pub attendance_rate: u8,
    pub capacity_utilization: u8,
    pub office_occupancy: u8,
}

/// 容量数据是否对当前角色开放。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    Available,
    Unavailable,
}

/// 容量聚合结果。
///
/// 每次刷新整体替换，不做增量合并。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityAggregate {
    pub availability: Availability,
    pub totals: CapacityTotals,
    pub rates: CapacityRates,
    pub departments: Vec<DepartmentRollup>,
    pub employees: Vec<EmployeeRecord>,
    pub team_departments: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_updated_ms: Option<i64>,
}

impl CapacityAggregate {
    /// 尚无数据时的初始状态。
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// 角色无权查看时的状态（不是错误）。
    pub fn unavailable(now_ms: i64) -> Self {
        Self {
            availability: Availability::Unavailable,
            last_updated_ms: Some(now_ms),
            ..Self::default()
        }
    }

    /// 在保留原有数据的前提下标记失败。
    pub fn with_error(&self, message: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            error: Some(message.into()),
            ..self.clone()
        }
    }

    /// 去掉员工明细，仅保留汇总。
    pub fn without_employees(&self) -> Self {
        Self {
            employees: Vec::new(),
            ..self.clone()
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}
