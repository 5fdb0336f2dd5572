//! 网关错误类型。

/// 网关调用错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// 网络错误或非 2xx 状态码
    #[error("transport error: {0}")]
    Transport(String),
    /// 响应封装 `success == false`
    #[error("request rejected: {0}")]
    Rejected(String),
    /// 响应结构无法解析
    #[error("decode error: {0}")]
    Decode(String),
}
