use chrono::NaiveDate;
use domain::{
    Availability, CapacityAggregate, Clock, LeaveWindow, ManualClock, PresenceStatus, Role,
    ViewerContext,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

#[test]
fn viewer_context_builds() {
    let ctx = ViewerContext::new("user-1", Role::Manager);

    assert_eq!(ctx.user_id, "user-1");
    assert_eq!(ctx.role, Role::Manager);
    assert!(ctx.role.uses_team_scope());
}

#[test]
fn role_parses_aliases() {
    assert_eq!("ADMIN".parse::<Role>().expect("admin"), Role::Admin);
    assert_eq!("hr_manager".parse::<Role>().expect("hr"), Role::Hr);
    assert_eq!("hr-manager".parse::<Role>().expect("hr"), Role::Hr);
    assert!(!Role::Employee.can_view_capacity());
    assert!("intern".parse::<Role>().is_err());
}

#[test]
fn leave_window_is_inclusive() {
    let window = LeaveWindow {
        employee_id: "e-1".to_string(),
        start: day(2024, 1, 10),
        end: day(2024, 1, 12),
    };

    assert!(!window.contains(day(2024, 1, 9)));
    assert!(window.contains(day(2024, 1, 10)));
    assert!(window.contains(day(2024, 1, 11)));
    assert!(window.contains(day(2024, 1, 12)));
    assert!(!window.contains(day(2024, 1, 13)));
}

#[test]
fn presence_status_serializes_kebab_case() {
    let json = serde_json::to_string(&PresenceStatus::OnLeave).expect("json");
    assert_eq!(json, "\"on-leave\"");
    assert_eq!(
        "on_leave".parse::<PresenceStatus>().expect("status"),
        PresenceStatus::OnLeave
    );
    assert!(PresenceStatus::Remote.is_available());
    assert!(!PresenceStatus::Offline.is_available());
}

#[test]
fn aggregate_error_keeps_data() {
    let mut aggregate = CapacityAggregate::loading();
    aggregate.totals.total_employees = 4;
    aggregate.team_departments = vec!["Ops".to_string()];

    let failed = aggregate.with_error("gateway down");
    assert!(!failed.is_loading);
    assert_eq!(failed.error.as_deref(), Some("gateway down"));
    assert_eq!(failed.totals.total_employees, 4);
    assert_eq!(failed.team_departments, vec!["Ops".to_string()]);
}

#[test]
fn unavailable_is_not_an_error() {
    let aggregate = CapacityAggregate::unavailable(42);
    assert_eq!(aggregate.availability, Availability::Unavailable);
    assert!(aggregate.error.is_none());
    assert!(!aggregate.is_loading);
    assert_eq!(aggregate.last_updated_ms, Some(42));
}

#[test]
fn manual_clock_moves() {
    let clock = ManualClock::new(1_000, day(2024, 1, 11));
    clock.advance_ms(500);
    clock.set_today(day(2024, 1, 13));

    assert_eq!(clock.now_ms(), 1_500);
    assert_eq!(clock.today(), day(2024, 1, 13));
}
