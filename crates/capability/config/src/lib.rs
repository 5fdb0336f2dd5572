//! 应用运行配置加载。

use domain::{Role, ViewerContext};
use std::env;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub gateway_url: String,
    pub gateway_token: Option<String>,
    pub gateway_timeout_ms: u64,
    pub viewer_role: Role,
    pub viewer_id: String,
    pub cache_timeout_ms: u64,
    pub refresh_interval_ms: u64,
    pub auto_fetch: bool,
    pub include_employee_details: bool,
    pub event_bus_capacity: usize,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let gateway_url = env::var("HR_GATEWAY_URL")
            .map_err(|_| ConfigError::Missing("HR_GATEWAY_URL".to_string()))?;
        let http_addr = env::var("HR_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let gateway_token = read_optional("HR_GATEWAY_TOKEN");
        let gateway_timeout_ms = read_u64_with_default("HR_GATEWAY_TIMEOUT_MS", 10_000)?;
        let viewer_role = read_role_with_default("HR_VIEWER_ROLE", Role::Admin)?;
        let viewer_id = env::var("HR_VIEWER_ID").unwrap_or_else(|_| "system".to_string());
        let cache_timeout_ms = read_u64_with_default("HR_CACHE_TIMEOUT_MS", 60_000)?;
        let refresh_interval_ms = read_u64_with_default("HR_REFRESH_INTERVAL_MS", 30_000)?;
        if refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "HR_REFRESH_INTERVAL_MS".to_string(),
                "0".to_string(),
            ));
        }
        let auto_fetch = read_bool_with_default("HR_AUTO_FETCH", true);
        let include_employee_details = read_bool_with_default("HR_INCLUDE_EMPLOYEE_DETAILS", true);
        let event_bus_capacity = read_u64_with_default("HR_EVENT_BUS_CAPACITY", 64)?.max(1) as usize;

        Ok(Self {
            http_addr,
            gateway_url,
            gateway_token,
            gateway_timeout_ms,
            viewer_role,
            viewer_id,
            cache_timeout_ms,
            refresh_interval_ms,
            auto_fetch,
            include_employee_details,
            event_bus_capacity,
        })
    }

    /// 服务端常驻订阅所代表的查看者。
    pub fn viewer(&self) -> ViewerContext {
        ViewerContext::new(self.viewer_id.clone(), self.viewer_role)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms)
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_role_with_default(key: &str, default: Role) -> Result<Role, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<Role>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
