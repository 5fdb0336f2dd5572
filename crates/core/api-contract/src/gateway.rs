//! 远端 HR 网关报文。
//!
//! 网关各接口的字段命名并不统一，这里统一做宽松解析：
//! - 列表数据可能是 `data: [...]`，也可能是 `data: { data: [...] }`
//! - 员工 ID、请假日期、请假人等字段存在多个别名
//! - ID、日期可能是字符串也可能是数字
//! - 单条记录解析失败只跳过该条，不影响整个列表

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// 网关统一响应封装。
#[derive(Debug, Deserialize)]
pub struct GatewayEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

impl<T> GatewayEnvelope<T> {
    /// 失败原因（优先 `error`，其次 `message`）。
    pub fn failure_reason(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(|value| value.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| serde_json::Value::Object(map.clone()).to_string()),
            Some(other) if !other.is_null() => other.to_string(),
            _ => self
                .message
                .clone()
                .unwrap_or_else(|| "request rejected".to_string()),
        }
    }
}

/// 列表数据的两种形态。
#[derive(Debug, Deserialize)]
#[serde(untagged, bound(deserialize = "T: DeserializeOwned"))]
pub enum ListPayload<T> {
    Flat(TolerantList<T>),
    Nested { data: TolerantList<T> },
}

impl<T> ListPayload<T> {
    fn list(&self) -> &TolerantList<T> {
        match self {
            ListPayload::Flat(list) => list,
            ListPayload::Nested { data } => data,
        }
    }

    /// 解析失败被跳过的记录数。
    pub fn skipped(&self) -> usize {
        self.list().skipped
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Flat(list) => list.items,
            ListPayload::Nested { data } => data.items,
        }
    }
}

/// 逐条解析的数组。
#[derive(Debug)]
pub struct TolerantList<T> {
    items: Vec<T>,
    skipped: usize,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for TolerantList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let total = raw.len();
        let items: Vec<T> = raw
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        Ok(Self {
            skipped: total - items.len(),
            items,
        })
    }
}

/// 字符串或数字形式的 ID。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Text(String),
    Number(serde_json::Number),
}

impl FlexId {
    pub fn into_string(self) -> String {
        match self {
            FlexId::Text(text) => text,
            FlexId::Number(number) => number.to_string(),
        }
    }
}

/// 文本字段：字符串或数字，其他类型按缺失处理。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexText {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl FlexText {
    pub fn to_text(&self) -> Option<String> {
        match self {
            FlexText::Text(text) => Some(text.clone()),
            FlexText::Number(number) => Some(number.to_string()),
            FlexText::Other(_) => None,
        }
    }
}

/// 按顺序取第一个非空文本。
fn first_text<const N: usize>(fields: [&Option<FlexText>; N]) -> Option<String> {
    fields
        .into_iter()
        .flatten()
        .filter_map(FlexText::to_text)
        .find(|text| !text.trim().is_empty())
}

/// 部门字段：字符串或 `{ name }` 对象。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DepartmentField {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl DepartmentField {
    pub fn into_name(self) -> String {
        match self {
            DepartmentField::Name(name) => name,
            DepartmentField::Object { name } => name.unwrap_or_default(),
        }
    }
}

/// 网关员工记录。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmployee {
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<FlexId>,
    #[serde(default)]
    pub user_id: Option<FlexId>,
    #[serde(default)]
    pub employee_id: Option<FlexId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<DepartmentField>,
    #[serde(default)]
    pub position: Option<FlexText>,
    #[serde(default)]
    pub job_title: Option<FlexText>,
    #[serde(default)]
    pub last_active: Option<FlexText>,
    #[serde(default, rename = "last_active")]
    pub last_active_snake: Option<FlexText>,
}

impl RawEmployee {
    /// 员工主键：`id` > `_id` > `userId` > `employeeId`。
    pub fn key(&self) -> Option<String> {
        [&self.id, &self.object_id, &self.user_id, &self.employee_id]
            .into_iter()
            .flatten()
            .map(|id| id.clone().into_string())
            .find(|id| !id.is_empty())
    }

    /// 显示名：`name`，否则 `firstName lastName`。
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|name| !name.trim().is_empty()) {
            return name.to_string();
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        parts.join(" ")
    }

    pub fn department_name(&self) -> String {
        self.department
            .clone()
            .map(DepartmentField::into_name)
            .unwrap_or_default()
    }

    /// 职位：`position` > `jobTitle`。
    pub fn position(&self) -> String {
        first_text([&self.position, &self.job_title]).unwrap_or_default()
    }

    /// 最近活跃时间：`lastActive` > `last_active`。
    pub fn last_active(&self) -> Option<String> {
        first_text([&self.last_active, &self.last_active_snake])
    }
}

/// 网关请假记录。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeaveRequest {
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<FlexText>,
    #[serde(default, rename = "start_date")]
    pub start_date_snake: Option<FlexText>,
    #[serde(default)]
    pub end_date: Option<FlexText>,
    #[serde(default, rename = "end_date")]
    pub end_date_snake: Option<FlexText>,
    #[serde(default)]
    pub user_id: Option<FlexId>,
    #[serde(default, rename = "user_id")]
    pub user_id_snake: Option<FlexId>,
    #[serde(default)]
    pub employee_id: Option<FlexId>,
    #[serde(default, rename = "employee_id")]
    pub employee_id_snake: Option<FlexId>,
}

impl RawLeaveRequest {
    pub fn is_approved(&self) -> bool {
        self.status.as_deref() == Some("approved")
    }

    /// 请假人：`userId` / `user_id` > `employeeId` > `employee_id`。
    pub fn employee_ref(&self) -> Option<String> {
        [
            &self.user_id,
            &self.user_id_snake,
            &self.employee_id,
            &self.employee_id_snake,
        ]
            .into_iter()
            .flatten()
            .map(|id| id.clone().into_string())
            .find(|id| !id.is_empty())
    }

    /// 开始日期：`startDate` > `start_date`；数字按 Unix 毫秒处理。
    pub fn start(&self) -> Option<String> {
        first_text([&self.start_date, &self.start_date_snake])
    }

    pub fn end(&self) -> Option<String> {
        first_text([&self.end_date, &self.end_date_snake])
    }
}
