//! 输入验证辅助函数
//!
//! - normalize_required：去除首尾空格，空字符串返回 bad_request_error
//! - normalize_optional：去除首尾空格，空字符串视为未提供

use crate::utils::response::bad_request_error;
use axum::response::Response;

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 可选查询参数：去除空格，空值按未提供处理
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn required_rejects_blank() {
        let response = normalize_required("  ".to_string(), "type").expect_err("blank");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(
            normalize_required(" leave-approved ".to_string(), "type").as_deref(),
            Ok("leave-approved")
        ));
    }

    #[test]
    fn optional_treats_blank_as_absent() {
        assert_eq!(normalize_optional(Some(" ".to_string())), None);
        assert_eq!(normalize_optional(Some(" Eng ".to_string())), Some("Eng".to_string()));
        assert_eq!(normalize_optional(None), None);
    }
}
