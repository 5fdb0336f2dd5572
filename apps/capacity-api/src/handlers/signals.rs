//! 变更信号 handler
//!
//! - POST /api/capacity/signals

use crate::AppState;
use crate::utils::normalize_required;
use api_contract::{ApiResponse, ChangeSignalAcceptedDto, ChangeSignalRequest};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hr_events::{ChangeEvent, ChangeKind};
use tracing::info;

pub async fn post_signal(
    State(state): State<AppState>,
    Json(req): Json<ChangeSignalRequest>,
) -> Response {
    let kind = match normalize_required(req.kind, "type") {
        Ok(kind) => ChangeKind::parse(&kind),
        Err(response) => return response,
    };
    let relevant = kind.is_relevant();
    let delivered = state.bus.publish(ChangeEvent::new(
        kind.clone(),
        req.user_id,
        state.clock.now_ms(),
    ));
    info!(
        target: "hr.api",
        kind = %kind.as_str(),
        relevant,
        delivered,
        extra_fields = req.detail.len(),
        "change signal accepted"
    );
    (
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(ChangeSignalAcceptedDto {
            kind: kind.as_str().to_string(),
            relevant,
            delivered,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::test_state;
    use hr_feed::FeedOptions;

    fn request(kind: &str) -> ChangeSignalRequest {
        serde_json::from_value(serde_json::json!({ "type": kind, "userId": "u-9", "leaveId": 7 }))
            .expect("request")
    }

    #[tokio::test]
    async fn signal_is_published_on_bus() {
        let (state, _gateway) = test_state(FeedOptions::default());
        let mut rx = state.bus.subscribe();

        let response = post_signal(State(state.clone()), Json(request("leave-approved"))).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let event = rx.recv().await.expect("event");
        assert_eq!(event.kind, ChangeKind::LeaveApproved);
        assert_eq!(event.user_id.as_deref(), Some("u-9"));
        assert_eq!(event.at_ms, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn blank_type_is_rejected() {
        let (state, _gateway) = test_state(FeedOptions::default());
        let response = post_signal(State(state), Json(request("  "))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
