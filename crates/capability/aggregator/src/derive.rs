//! 容量推导（纯函数）。
//!
//! 输入为网关原始记录、今天的日期和本次聚合时间，输出完整的 `CapacityAggregate`。
//! 状态推导只会产生 `present` 与 `on-leave`。

use api_contract::{RawEmployee, RawLeaveRequest};
use chrono::NaiveDate;
use domain::{
    CapacityAggregate, CapacityRates, CapacityTotals, DepartmentRollup, EmployeeRecord,
    LeaveWindow, PresenceStatus, normalize_local_date, parse_timestamp_ms,
};
use std::collections::{HashMap, HashSet};

/// 单次聚合拉取到的原始数据。
#[derive(Debug, Clone, Default)]
pub struct RawCapacityData {
    pub employees: Vec<RawEmployee>,
    pub leave_requests: Vec<RawLeaveRequest>,
    pub team_departments: Vec<String>,
}

/// 百分比：`round(part / total * 100)`，total 为 0 时返回 0。
pub fn rate(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 200 + total) / (total * 2);
    rounded.min(100) as u8
}

/// 从已批准的请假记录中提取日期区间。
///
/// 非 approved 的记录直接跳过；缺少请假人或日期无法解析的记录同样跳过。
pub fn leave_windows(requests: &[RawLeaveRequest]) -> Vec<LeaveWindow> {
    requests
        .iter()
        .filter(|request| request.is_approved())
        .filter_map(|request| {
            let employee_id = request.employee_ref()?;
            let start = normalize_local_date(&request.start()?)?;
            let end = normalize_local_date(&request.end()?)?;
            Some(LeaveWindow {
                employee_id,
                start,
                end,
            })
        })
        .collect()
}

/// 今天处于请假区间内的员工 ID。
pub fn employees_on_leave(windows: &[LeaveWindow], today: NaiveDate) -> HashSet<String> {
    windows
        .iter()
        .filter(|window| window.contains(today))
        .map(|window| window.employee_id.clone())
        .collect()
}

pub fn build_employees(
    raw: Vec<RawEmployee>,
    on_leave: &HashSet<String>,
    now_ms: i64,
) -> Vec<EmployeeRecord> {
    raw.into_iter()
        .map(|employee| {
            let id = employee.key().unwrap_or_default();
            let status = if on_leave.contains(&id) {
                PresenceStatus::OnLeave
            } else {
                PresenceStatus::Present
            };
            let last_active_ms = employee
                .last_active()
                .as_deref()
                .and_then(parse_timestamp_ms)
                .unwrap_or(now_ms);
            let position = employee.position();
            EmployeeRecord {
                name: employee.display_name(),
                department: employee.department_name(),
                email: employee.email.unwrap_or_default(),
                position,
                id,
                status,
                is_available: status.is_available(),
                last_active_ms,
            }
        })
        .collect()
}

pub fn compute_totals(employees: &[EmployeeRecord]) -> CapacityTotals {
    let count = |status: PresenceStatus| {
        employees
            .iter()
            .filter(|employee| employee.status == status)
            .count()
    };
    let total_employees = employees.len();
    let present_today = count(PresenceStatus::Present);
    let working_remotely = count(PresenceStatus::Remote);
    CapacityTotals {
        total_employees,
        present_today,
        absent_today: total_employees - present_today - working_remotely,
        on_leave_today: count(PresenceStatus::OnLeave),
        working_remotely,
    }
}

/// 比率指标。
///
/// `capacity_utilization` 目前与出勤率相同；`office_occupancy` 把远程员工计入在岗，
/// 但现有推导不会产出远程状态，所以两者数值一致。
pub fn compute_rates(totals: &CapacityTotals) -> CapacityRates {
    let attendance_rate = rate(totals.present_today, totals.total_employees);
    CapacityRates {
        attendance_rate,
        capacity_utilization: attendance_rate,
        office_occupancy: rate(
            totals.present_today + totals.working_remotely,
            totals.total_employees,
        ),
    }
}

/// 按部门汇总，顺序为部门首次出现的顺序；部门为空的员工不参与汇总。
pub fn rollup_departments(employees: &[EmployeeRecord]) -> Vec<DepartmentRollup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rollups: Vec<DepartmentRollup> = Vec::new();
    for employee in employees {
        if employee.department.is_empty() {
            continue;
        }
        let slot = *index
            .entry(employee.department.as_str())
            .or_insert_with(|| {
                rollups.push(DepartmentRollup {
                    name: employee.department.clone(),
                    total: 0,
                    present: 0,
                    on_leave: 0,
                    attendance_rate: 0,
                });
                rollups.len() - 1
            });
        let rollup = &mut rollups[slot];
        rollup.total += 1;
        match employee.status {
            PresenceStatus::Present => rollup.present += 1,
            PresenceStatus::OnLeave => rollup.on_leave += 1,
            PresenceStatus::Remote | PresenceStatus::Offline => {}
        }
    }
    for rollup in &mut rollups {
        rollup.attendance_rate = rate(rollup.present, rollup.total);
    }
    rollups
}

/// 由原始数据构造完整的聚合结果。
pub fn build_aggregate(data: RawCapacityData, today: NaiveDate, now_ms: i64) -> CapacityAggregate {
    let windows = leave_windows(&data.leave_requests);
    let on_leave = employees_on_leave(&windows, today);
    let employees = build_employees(data.employees, &on_leave, now_ms);
    let totals = compute_totals(&employees);
    let rates = compute_rates(&totals);
    let departments = rollup_departments(&employees);
    CapacityAggregate {
        availability: Default::default(),
        totals,
        rates,
        departments,
        employees,
        team_departments: data.team_departments,
        is_loading: false,
        error: None,
        last_updated_ms: Some(now_ms),
    }
}
