//! # 变更事件总线
//!
//! 进程内广播通道：某处的请假操作或员工资料变更发布到总线后，
//! 所有已挂载的容量视图收到事件并强制刷新。
//!
//! 发布不阻塞；没有订阅者时事件被丢弃。订阅方处理过慢时会收到 `Lagged`，
//! 由订阅方自行决定如何补偿。

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// 默认通道容量。
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// 变更类型。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeKind {
    LeaveCreated,
    LeaveApproved,
    LeaveRejected,
    LeaveCancelled,
    EmployeeUpdated,
    Other(String),
}

impl ChangeKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "leave-created" => ChangeKind::LeaveCreated,
            "leave-approved" => ChangeKind::LeaveApproved,
            "leave-rejected" => ChangeKind::LeaveRejected,
            "leave-cancelled" | "leave-canceled" => ChangeKind::LeaveCancelled,
            "employee-updated" => ChangeKind::EmployeeUpdated,
            _ => ChangeKind::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::LeaveCreated => "leave-created",
            ChangeKind::LeaveApproved => "leave-approved",
            ChangeKind::LeaveRejected => "leave-rejected",
            ChangeKind::LeaveCancelled => "leave-cancelled",
            ChangeKind::EmployeeUpdated => "employee-updated",
            ChangeKind::Other(raw) => raw,
        }
    }

    /// 是否会影响容量数据。
    pub fn is_relevant(&self) -> bool {
        !matches!(self, ChangeKind::Other(_))
    }
}

impl From<String> for ChangeKind {
    fn from(raw: String) -> Self {
        ChangeKind::parse(&raw)
    }
}

impl From<ChangeKind> for String {
    fn from(kind: ChangeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// 变更事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default)]
    pub user_id: Option<String>,
    pub at_ms: i64,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, user_id: Option<String>, at_ms: i64) -> Self {
        Self {
            kind,
            user_id,
            at_ms,
        }
    }
}

/// 事件总线（可克隆，克隆体共享同一通道）。
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// 发布事件，返回收到事件的订阅者数量。
    pub fn publish(&self, event: ChangeEvent) -> usize {
        hr_telemetry::record_change_signal();
        let kind = event.kind.as_str().to_string();
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(target: "hr.events", kind = %kind, delivered, "change_published");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}
