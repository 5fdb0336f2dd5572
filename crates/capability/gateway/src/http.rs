//! HTTP 网关实现。

use crate::error::GatewayError;
use crate::{DataGateway, LeaveQuery};
use api_contract::{DepartmentField, GatewayEnvelope, ListPayload, RawEmployee, RawLeaveRequest};
use async_trait::async_trait;
use domain::ViewerContext;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const EMPLOYEES_PATH: &str = "/employees";
const TEAM_MEMBERS_PATH: &str = "/team/members";
const LEAVE_REQUESTS_PATH: &str = "/leave-requests";
const LEAVE_APPROVALS_PATH: &str = "/team/leave-approvals";
const TEAM_DEPARTMENTS_PATH: &str = "/team/departments";

/// HTTP 网关配置。
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

/// 基于 reqwest 的网关实现。
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        ctx: &ViewerContext,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.url(path);
        let mut request = self
            .client
            .get(&url)
            .query(query)
            .header("x-user-id", ctx.user_id.as_str())
            .header("x-user-role", ctx.role.as_str());
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        debug!(
            target: "hr.gateway",
            url = %url,
            status = status.as_u16(),
            body_size = body.len(),
            "gateway_response"
        );
        if !status.is_success() {
            let reason = serde_json::from_slice::<GatewayEnvelope<serde_json::Value>>(&body)
                .map(|envelope| envelope.failure_reason())
                .unwrap_or_else(|_| format!("http status {}", status.as_u16()));
            return Err(GatewayError::Transport(reason));
        }
        decode_list(&body)
    }
}

/// 解析列表响应：`success == false` 视为拒绝，缺少 `data` 视为空列表。
pub fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, GatewayError> {
    let envelope: GatewayEnvelope<ListPayload<T>> =
        serde_json::from_slice(body).map_err(|err| GatewayError::Decode(err.to_string()))?;
    if !envelope.success {
        return Err(GatewayError::Rejected(envelope.failure_reason()));
    }
    let Some(list) = envelope.data else {
        return Ok(Vec::new());
    };
    if list.skipped() > 0 {
        warn!(target: "hr.gateway", skipped = list.skipped(), "malformed records skipped");
    }
    Ok(list.into_vec())
}

fn leave_params(query: &LeaveQuery) -> Vec<(&str, &str)> {
    query
        .status
        .as_deref()
        .map(|status| vec![("status", status)])
        .unwrap_or_default()
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn list_employees(&self, ctx: &ViewerContext) -> Result<Vec<RawEmployee>, GatewayError> {
        self.get_list(ctx, EMPLOYEES_PATH, &[]).await
    }

    async fn list_team_members(
        &self,
        ctx: &ViewerContext,
    ) -> Result<Vec<RawEmployee>, GatewayError> {
        self.get_list(ctx, TEAM_MEMBERS_PATH, &[]).await
    }

    async fn list_leave_requests(
        &self,
        ctx: &ViewerContext,
        query: &LeaveQuery,
    ) -> Result<Vec<RawLeaveRequest>, GatewayError> {
        self.get_list(ctx, LEAVE_REQUESTS_PATH, &leave_params(query))
            .await
    }

    async fn list_leave_approvals(
        &self,
        ctx: &ViewerContext,
        query: &LeaveQuery,
    ) -> Result<Vec<RawLeaveRequest>, GatewayError> {
        self.get_list(ctx, LEAVE_APPROVALS_PATH, &leave_params(query))
            .await
    }

    async fn list_team_departments(
        &self,
        ctx: &ViewerContext,
    ) -> Result<Vec<String>, GatewayError> {
        let departments: Vec<DepartmentField> =
            self.get_list(ctx, TEAM_DEPARTMENTS_PATH, &[]).await?;
        Ok(departments
            .into_iter()
            .map(DepartmentField::into_name)
            .filter(|name| !name.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_list_handles_both_shapes() {
        let flat: Vec<String> = decode_list(br#"{"success":true,"data":["Eng","Ops"]}"#)
            .expect("flat");
        assert_eq!(flat, vec!["Eng".to_string(), "Ops".to_string()]);

        let nested: Vec<String> =
            decode_list(br#"{"success":true,"data":{"data":["Eng"]}}"#).expect("nested");
        assert_eq!(nested, vec!["Eng".to_string()]);
    }

    #[test]
    fn decode_list_skips_bad_items() {
        let employees: Vec<RawEmployee> = decode_list(
            br#"{"success":true,"data":[{"id":"e-1","position":"Dev","jobTitle":"Dev"},{"id":"e-2","department":7}]}"#,
        )
        .expect("tolerant");
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].key().as_deref(), Some("e-1"));
    }

    #[test]
    fn decode_list_missing_data_is_empty() {
        let items: Vec<String> = decode_list(br#"{"success":true}"#).expect("empty");
        assert!(items.is_empty());
    }

    #[test]
    fn decode_list_rejects_unsuccessful_envelope() {
        let err = decode_list::<String>(br#"{"success":false,"message":"forbidden"}"#)
            .expect_err("rejected");
        assert_eq!(err, GatewayError::Rejected("forbidden".to_string()));
    }

    #[test]
    fn decode_list_reports_malformed_body() {
        let err = decode_list::<String>(b"<html>").expect_err("decode");
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn leave_params_include_status() {
        assert_eq!(leave_params(&LeaveQuery::approved()), vec![("status", "approved")]);
        assert!(leave_params(&LeaveQuery::default()).is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new(HttpGatewayConfig {
            base_url: "http://127.0.0.1:9000/api/".to_string(),
            token: None,
            timeout: Duration::from_secs(1),
        })
        .expect("gateway");
        assert_eq!(gateway.url(EMPLOYEES_PATH), "http://127.0.0.1:9000/api/employees");
    }
}
