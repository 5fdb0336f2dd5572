//! 员工明细筛选。

use domain::{EmployeeRecord, PresenceStatus};

/// 员工列表筛选条件，各条件之间为“且”关系；未设置的条件不参与筛选。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub status: Option<PresenceStatus>,
    pub department: Option<String>,
    pub available_only: bool,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &EmployeeRecord) -> bool {
        if self.status.is_some_and(|status| status != employee.status) {
            return false;
        }
        if self
            .department
            .as_deref()
            .is_some_and(|department| department != employee.department)
        {
            return false;
        }
        !self.available_only || employee.is_available
    }

    pub fn apply<'a>(&self, employees: &'a [EmployeeRecord]) -> Vec<&'a EmployeeRecord> {
        employees
            .iter()
            .filter(|employee| self.matches(employee))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, department: &str, status: PresenceStatus) -> EmployeeRecord {
        EmployeeRecord {
            id: id.to_string(),
            name: id.to_string(),
            email: String::new(),
            department: department.to_string(),
            position: String::new(),
            status,
            is_available: status.is_available(),
            last_active_ms: 0,
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let employees = vec![
            record("e-1", "Eng", PresenceStatus::Present),
            record("e-2", "Ops", PresenceStatus::OnLeave),
        ];
        assert_eq!(EmployeeFilter::default().apply(&employees).len(), 2);
    }

    #[test]
    fn conditions_are_combined() {
        let employees = vec![
            record("e-1", "Eng", PresenceStatus::Present),
            record("e-2", "Eng", PresenceStatus::OnLeave),
            record("e-3", "Ops", PresenceStatus::Present),
        ];
        let filter = EmployeeFilter {
            department: Some("Eng".to_string()),
            available_only: true,
            ..Default::default()
        };
        let ids: Vec<&str> = filter
            .apply(&employees)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e-1"]);

        let on_leave = EmployeeFilter {
            status: Some(PresenceStatus::OnLeave),
            ..Default::default()
        };
        assert_eq!(on_leave.apply(&employees).len(), 1);
    }
}
