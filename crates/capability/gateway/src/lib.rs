//! # 远端数据网关
//!
//! 容量聚合所需的原始数据（员工、请假、部门）全部来自远端 HR 网关。
//! 本模块只定义能力接口和两种实现，不包含任何聚合逻辑：
//!
//! - [`DataGateway`]：按角色区分的组织级 / 团队级接口
//! - [`HttpGateway`]：基于 reqwest 的 HTTP JSON 实现（生产环境）
//! - [`InMemoryGateway`]：内存实现，支持按接口注入失败和延迟（测试与演示）
//!
//! 所有接口显式接收 `ViewerContext`，返回宽松解析后的原始记录。

pub mod error;
pub mod http;
pub mod in_memory;

pub use error::GatewayError;
pub use http::{HttpGateway, HttpGatewayConfig};
pub use in_memory::{Endpoint, InMemoryGateway};

use api_contract::{RawEmployee, RawLeaveRequest};
use async_trait::async_trait;
use domain::ViewerContext;

/// 请假查询参数。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveQuery {
    pub status: Option<String>,
}

impl LeaveQuery {
    /// 仅查询已批准的请假。
    pub fn approved() -> Self {
        Self {
            status: Some("approved".to_string()),
        }
    }
}

/// 远端数据网关接口。
///
/// - admin / hr：`list_employees` + `list_leave_requests`
/// - manager：`list_team_members` + `list_leave_approvals` + `list_team_departments`
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// 组织内全部员工
    async fn list_employees(&self, ctx: &ViewerContext) -> Result<Vec<RawEmployee>, GatewayError>;

    /// 当前经理的团队成员
    async fn list_team_members(
        &self,
        ctx: &ViewerContext,
    ) -> Result<Vec<RawEmployee>, GatewayError>;

    /// 组织级请假记录
    async fn list_leave_requests(
        &self,
        ctx: &ViewerContext,
        query: &LeaveQuery,
    ) -> Result<Vec<RawLeaveRequest>, GatewayError>;

    /// 团队级请假审批记录
    async fn list_leave_approvals(
        &self,
        ctx: &ViewerContext,
        query: &LeaveQuery,
    ) -> Result<Vec<RawLeaveRequest>, GatewayError>;

    /// 团队涉及的部门名称
    async fn list_team_departments(
        &self,
        ctx: &ViewerContext,
    ) -> Result<Vec<String>, GatewayError>;
}
