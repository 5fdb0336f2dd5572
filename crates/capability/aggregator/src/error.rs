//! 聚合错误类型。

use domain::Role;
use hr_gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("failed to load capacity data: {0}")]
    Gateway(#[from] GatewayError),
    #[error("capacity data is not available for role {0}")]
    Unavailable(Role),
}
