//! API 请求/响应类型定义

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 区分「字段缺失」和「显式 null」：缺失为 `None`，null 为 `Some(Value::Null)`
fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// 文件夹请求体（创建 / 重命名）
///
/// 字段保留原始 JSON 值，由 validation 模块逐字段报告类型错误。
#[derive(Debug, Default, Deserialize)]
pub struct FolderPayload {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Value>,
}

/// 书签请求体（创建 / 更新）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPayload {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub url: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub folder_id: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub favicon: Option<Value>,
}

/// `GET /bookmarks` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct BookmarkQuery {
    pub search: Option<String>,
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 统一错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub timestamp: String,
    /// 运行秒数
    pub uptime: u64,
}
