//! 网关内存实现（用于测试与演示）。
//!
//! 不区分组织 / 团队范围，也不做服务端状态过滤：请假接口原样返回全部记录。

use crate::error::GatewayError;
use crate::{DataGateway, LeaveQuery};
use api_contract::{RawEmployee, RawLeaveRequest};
use async_trait::async_trait;
use domain::ViewerContext;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

/// 网关接口标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Employees,
    TeamMembers,
    LeaveRequests,
    LeaveApprovals,
    TeamDepartments,
}

#[derive(Default)]
struct State {
    employees: Vec<RawEmployee>,
    leave_requests: Vec<RawLeaveRequest>,
    departments: Vec<String>,
    failures: HashMap<Endpoint, String>,
    calls: HashMap<Endpoint, usize>,
    delay: Option<Duration>,
}

/// 内存网关。
#[derive(Default)]
pub struct InMemoryGateway {
    state: RwLock<State>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_employees(&self, employees: Vec<RawEmployee>) {
        if let Ok(mut state) = self.state.write() {
            state.employees = employees;
        }
    }

    pub fn set_leave_requests(&self, leave_requests: Vec<RawLeaveRequest>) {
        if let Ok(mut state) = self.state.write() {
            state.leave_requests = leave_requests;
        }
    }

    pub fn set_departments(&self, departments: Vec<String>) {
        if let Ok(mut state) = self.state.write() {
            state.departments = departments;
        }
    }

    /// 令指定接口后续调用失败。
    pub fn fail(&self, endpoint: Endpoint, message: impl Into<String>) {
        if let Ok(mut state) = self.state.write() {
            state.failures.insert(endpoint, message.into());
        }
    }

    pub fn clear_failures(&self) {
        if let Ok(mut state) = self.state.write() {
            state.failures.clear();
        }
    }

    /// 每次调用前的人为延迟。
    pub fn set_delay(&self, delay: Option<Duration>) {
        if let Ok(mut state) = self.state.write() {
            state.delay = delay;
        }
    }

    /// 指定接口被调用的次数（用于测试）。
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.state
            .read()
            .map(|state| state.calls.get(&endpoint).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.state
            .read()
            .map(|state| state.calls.values().sum())
            .unwrap_or(0)
    }

    async fn serve<T>(
        &self,
        endpoint: Endpoint,
        select: impl Fn(&State) -> T,
    ) -> Result<T, GatewayError> {
        let delay = {
            let mut state = self
                .state
                .write()
                .map_err(|_| GatewayError::Transport("lock failed".to_string()))?;
            *state.calls.entry(endpoint).or_insert(0) += 1;
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self
            .state
            .read()
            .map_err(|_| GatewayError::Transport("lock failed".to_string()))?;
        if let Some(message) = state.failures.get(&endpoint) {
            return Err(GatewayError::Transport(message.clone()));
        }
        Ok(select(&state))
    }
}

#[async_trait]
impl DataGateway for InMemoryGateway {
    async fn list_employees(&self, _ctx: &ViewerContext) -> Result<Vec<RawEmployee>, GatewayError> {
        self.serve(Endpoint::Employees, |state| state.employees.clone())
            .await
    }

    async fn list_team_members(
        &self,
        _ctx: &ViewerContext,
    ) -> Result<Vec<RawEmployee>, GatewayError> {
        self.serve(Endpoint::TeamMembers, |state| state.employees.clone())
            .await
    }

    async fn list_leave_requests(
        &self,
        _ctx: &ViewerContext,
        _query: &LeaveQuery,
    ) -> Result<Vec<RawLeaveRequest>, GatewayError> {
        self.serve(Endpoint::LeaveRequests, |state| {
            state.leave_requests.clone()
        })
        .await
    }

    async fn list_leave_approvals(
        &self,
        _ctx: &ViewerContext,
        _query: &LeaveQuery,
    ) -> Result<Vec<RawLeaveRequest>, GatewayError> {
        self.serve(Endpoint::LeaveApprovals, |state| {
            state.leave_requests.clone()
        })
        .await
    }

    async fn list_team_departments(
        &self,
        _ctx: &ViewerContext,
    ) -> Result<Vec<String>, GatewayError> {
        self.serve(Endpoint::TeamDepartments, |state| state.departments.clone())
            .await
    }
}
