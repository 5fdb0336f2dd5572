//! # 容量聚合
//!
//! 从 HR 网关拉取员工与请假数据，推导今日出勤状态、汇总与部门分布。
//!
//! - admin / hr：全组织员工 + 全部已批准请假
//! - manager：团队成员 + 团队请假审批 + 团队部门列表
//! - employee：不调用网关，直接返回 `Availability::Unavailable`
//!
//! 成功结果按角色写入 [`AggregationCache`]；失败时保留旧数据并附带错误信息。

pub mod derive;
pub mod error;
pub mod filter;

pub use derive::{RawCapacityData, build_aggregate, rate};
pub use error::AggregateError;
pub use filter::EmployeeFilter;

use domain::{CapacityAggregate, Role, ViewerContext};
use hr_cache::AggregationCache;
use hr_gateway::{DataGateway, GatewayError, LeaveQuery};
use hr_telemetry::{record_aggregation_failure, record_aggregation_pass};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// 容量聚合器。
#[derive(Clone)]
pub struct CapacityAggregator {
    gateway: Arc<dyn DataGateway>,
    cache: AggregationCache,
}

impl CapacityAggregator {
    pub fn new(gateway: Arc<dyn DataGateway>, cache: AggregationCache) -> Self {
        Self { gateway, cache }
    }

    pub fn cache(&self) -> &AggregationCache {
        &self.cache
    }

    /// 角色是否有权查看容量数据。
    pub fn require_available(&self, ctx: &ViewerContext) -> Result<(), AggregateError> {
        if ctx.role.can_view_capacity() {
            Ok(())
        } else {
            Err(AggregateError::Unavailable(ctx.role))
        }
    }

    /// 读缓存，未命中时执行一次完整聚合。
    pub async fn aggregate(&self, ctx: &ViewerContext) -> Arc<CapacityAggregate> {
        self.aggregate_within(ctx, self.cache.timeout()).await
    }

    /// 同 [`aggregate`](Self::aggregate)，缓存按 `cache_timeout` 判断是否过期。
    pub async fn aggregate_within(
        &self,
        ctx: &ViewerContext,
        cache_timeout: Duration,
    ) -> Arc<CapacityAggregate> {
        if let Some(cached) = self.cache.read_within(ctx.role, cache_timeout).await {
            return cached;
        }
        self.aggregate_fresh(ctx).await
    }

    /// 跳过缓存读取，强制执行一次聚合。
    ///
    /// 失败时返回该角色的旧结果（不论是否过期）并带上错误信息；没有旧结果时返回空聚合。
    pub async fn aggregate_fresh(&self, ctx: &ViewerContext) -> Arc<CapacityAggregate> {
        match self.try_aggregate(ctx).await {
            Ok(aggregate) => aggregate,
            Err(err) => {
                let message = err.to_string();
                let degraded = match self.cache.peek(ctx.role).await {
                    Some(stale) => stale.with_error(message),
                    None => CapacityAggregate::default().with_error(message),
                };
                Arc::new(degraded)
            }
        }
    }

    /// 执行一次聚合，不读缓存；成功后写入缓存。
    pub async fn try_aggregate(
        &self,
        ctx: &ViewerContext,
    ) -> Result<Arc<CapacityAggregate>, AggregateError> {
        let clock = self.cache.clock().clone();
        if self.require_available(ctx).is_err() {
            info!(
                target: "hr.aggregator",
                role = %ctx.role,
                user_id = %ctx.user_id,
                "capacity unavailable for role"
            );
            return Ok(Arc::new(CapacityAggregate::unavailable(clock.now_ms())));
        }

        let started = Instant::now();
        let data = match self.fetch(ctx).await {
            Ok(data) => data,
            Err(err) => {
                record_aggregation_failure();
                warn!(
                    target: "hr.aggregator",
                    role = %ctx.role,
                    user_id = %ctx.user_id,
                    "aggregation failed: {}",
                    err
                );
                return Err(err.into());
            }
        };

        let aggregate = Arc::new(build_aggregate(data, clock.today(), clock.now_ms()));
        self.cache.write(ctx.role, aggregate.clone()).await;

        let latency_ms = started.elapsed().as_millis() as u64;
        record_aggregation_pass(latency_ms);
        info!(
            target: "hr.aggregator",
            role = %ctx.role,
            employees = aggregate.totals.total_employees,
            on_leave = aggregate.totals.on_leave_today,
            attendance_rate = aggregate.rates.attendance_rate,
            latency_ms,
            "aggregation complete"
        );
        Ok(aggregate)
    }

    async fn fetch(&self, ctx: &ViewerContext) -> Result<RawCapacityData, GatewayError> {
        let query = LeaveQuery::approved();
        let gateway = self.gateway.as_ref();
        match ctx.role {
            Role::Manager => {
                let (employees, leave_requests, team_departments) = tokio::try_join!(
                    gateway.list_team_members(ctx),
                    gateway.list_leave_approvals(ctx, &query),
                    gateway.list_team_departments(ctx),
                )?;
                Ok(RawCapacityData {
                    employees,
                    leave_requests,
                    team_departments,
                })
            }
            Role::Admin | Role::Hr | Role::Employee => {
                let (employees, leave_requests) = tokio::try_join!(
                    gateway.list_employees(ctx),
                    gateway.list_leave_requests(ctx, &query),
                )?;
                Ok(RawCapacityData {
                    employees,
                    leave_requests,
                    team_departments: Vec::new(),
                })
            }
        }
    }
}
