//! 查看者角色。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 角色解析错误。
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

/// 请求容量数据的角色。
///
/// - admin / hr：组织级接口
/// - manager：团队级接口（含团队部门）
/// - employee：无权查看容量数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// 是否允许查看容量数据。
    pub fn can_view_capacity(&self) -> bool {
        !matches!(self, Role::Employee)
    }

    /// 是否走团队级接口。
    pub fn uses_team_scope(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hr" | "hr_manager" | "hr-manager" => Ok(Role::Hr),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            _ => Err(RoleParseError(value.to_string())),
        }
    }
}
