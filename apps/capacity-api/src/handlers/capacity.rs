//! 容量视图 handlers
//!
//! - GET /api/capacity
//! - POST /api/capacity/refresh
//! - GET /api/capacity/employees

use crate::AppState;
use crate::utils::normalize_optional;
use crate::utils::response::{bad_request_error, forbidden_error, snapshot_to_dto};
use api_contract::{ApiResponse, EmployeeListDto, EmployeeQuery};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::PresenceStatus;
use hr_aggregator::EmployeeFilter;
use tracing::info;

pub async fn get_capacity(State(state): State<AppState>) -> Response {
    let snapshot = state.feed.snapshot();
    (StatusCode::OK, Json(ApiResponse::success(snapshot_to_dto(snapshot)))).into_response()
}

pub async fn refresh_capacity(State(state): State<AppState>) -> Response {
    info!(target: "hr.api", role = %state.feed.viewer().role, "manual refresh requested");
    let snapshot = state.feed.refresh_capacity_data().await;
    (StatusCode::OK, Json(ApiResponse::success(snapshot_to_dto(snapshot)))).into_response()
}

pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> Response {
    let filter = match parse_filter(query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    if let Err(err) = state.feed.aggregator().require_available(state.feed.viewer()) {
        return forbidden_error("CAPACITY.UNAVAILABLE", err.to_string());
    }
    if !state.feed.options().include_employee_details {
        return forbidden_error("CAPACITY.DETAILS_DISABLED", "employee details are disabled");
    }

    let snapshot = state.feed.snapshot();
    let items: Vec<_> = filter
        .apply(&snapshot.capacity.employees)
        .into_iter()
        .cloned()
        .collect();
    (
        StatusCode::OK,
        Json(ApiResponse::success(EmployeeListDto {
            total: items.len(),
            items,
        })),
    )
        .into_response()
}

fn parse_filter(query: EmployeeQuery) -> Result<EmployeeFilter, Response> {
    let status = match normalize_optional(query.status) {
        Some(raw) => Some(
            raw.parse::<PresenceStatus>()
                .map_err(|_| bad_request_error(format!("unknown status: {raw}")))?,
        ),
        None => None,
    };
    Ok(EmployeeFilter {
        status,
        department: normalize_optional(query.department),
        available_only: query.available_only,
    })
}
