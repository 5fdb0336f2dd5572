use api_contract::{GatewayEnvelope, ListPayload, RawEmployee, RawLeaveRequest};

#[test]
fn list_payload_accepts_flat_data() {
    let payload = r#"{"success":true,"data":[{"id":1,"name":"Ada","department":"Eng"}]}"#;
    let envelope: GatewayEnvelope<ListPayload<RawEmployee>> =
        serde_json::from_str(payload).expect("parse");
    let employees = envelope.data.expect("data").into_vec();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].key().as_deref(), Some("1"));
    assert_eq!(employees[0].department_name(), "Eng");
}

#[test]
fn list_payload_accepts_nested_data() {
    let payload = r#"{"success":true,"data":{"data":[{"_id":"abc"}],"total":1}}"#;
    let envelope: GatewayEnvelope<ListPayload<RawEmployee>> =
        serde_json::from_str(payload).expect("parse");
    let employees = envelope.data.expect("data").into_vec();
    assert_eq!(employees[0].key().as_deref(), Some("abc"));
    assert_eq!(employees[0].department_name(), "");
}

#[test]
fn employee_name_falls_back_to_parts() {
    let employee: RawEmployee =
        serde_json::from_str(r#"{"id":"e-1","firstName":"Grace","lastName":"Hopper","department":{"name":"Ops"}}"#)
            .expect("parse");
    assert_eq!(employee.display_name(), "Grace Hopper");
    assert_eq!(employee.department_name(), "Ops");
}

#[test]
fn leave_request_aliases() {
    let camel: RawLeaveRequest = serde_json::from_str(
        r#"{"status":"approved","startDate":"2024-01-10","endDate":"2024-01-12","employeeId":5}"#,
    )
    .expect("parse");
    assert!(camel.is_approved());
    assert_eq!(camel.employee_ref().as_deref(), Some("5"));
    assert_eq!(camel.start().as_deref(), Some("2024-01-10"));

    let snake: RawLeaveRequest = serde_json::from_str(
        r#"{"status":"pending","start_date":"2024-02-01","end_date":"2024-02-02","employee_id":"e-9"}"#,
    )
    .expect("parse");
    assert!(!snake.is_approved());
    assert_eq!(snake.employee_ref().as_deref(), Some("e-9"));
    assert_eq!(snake.end().as_deref(), Some("2024-02-02"));
}

#[test]
fn rejected_envelope_reports_reason() {
    let envelope: GatewayEnvelope<ListPayload<RawEmployee>> =
        serde_json::from_str(r#"{"success":false,"error":{"message":"forbidden"}}"#)
            .expect("parse");
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert_eq!(envelope.failure_reason(), "forbidden");

    let envelope: GatewayEnvelope<ListPayload<RawEmployee>> =
        serde_json::from_str(r#"{"success":false,"message":"maintenance"}"#).expect("parse");
    assert_eq!(envelope.failure_reason(), "maintenance");
}

#[test]
fn both_alias_spellings_do_not_fail_the_record() {
    let employees: ListPayload<RawEmployee> = serde_json::from_str(
        r#"[{"id":"e-1"},{"id":"e-2","position":"","jobTitle":"Dev","lastActive":"x","last_active":"2024-01-11T08:00:00Z"}]"#,
    )
    .expect("parse");
    let employees = employees.into_vec();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[1].position(), "Dev");
    assert_eq!(employees[1].last_active().as_deref(), Some("x"));

    let leave: RawLeaveRequest =
        serde_json::from_str(r#"{"status":"approved","userId":"","user_id":"e-7","startDate":"2024-01-10","endDate":"2024-01-10"}"#)
            .expect("parse");
    assert_eq!(leave.employee_ref().as_deref(), Some("e-7"));
}

#[test]
fn numeric_dates_are_kept_as_text() {
    let leave: RawLeaveRequest = serde_json::from_str(
        r#"{"status":"approved","userId":1,"startDate":1704844800000,"end_date":"2024-01-12"}"#,
    )
    .expect("parse");
    assert_eq!(leave.start().as_deref(), Some("1704844800000"));
    assert_eq!(leave.end().as_deref(), Some("2024-01-12"));

    let odd: RawLeaveRequest =
        serde_json::from_str(r#"{"status":"approved","startDate":true,"start_date":"2024-01-10"}"#)
            .expect("parse");
    assert_eq!(odd.start().as_deref(), Some("2024-01-10"));
}

#[test]
fn malformed_records_are_skipped_not_fatal() {
    let payload = r#"{"success":true,"data":{"data":[{"id":"e-1"},{"id":"e-2","name":{"first":"x"}},"junk",{"id":3}]}}"#;
    let envelope: GatewayEnvelope<ListPayload<RawEmployee>> =
        serde_json::from_str(payload).expect("parse");
    let list = envelope.data.expect("data");
    assert_eq!(list.skipped(), 2);
    let keys: Vec<String> = list.into_vec().iter().filter_map(RawEmployee::key).collect();
    assert_eq!(keys, vec!["e-1", "3"]);
}
