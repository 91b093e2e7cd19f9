//! 请求体校验
//!
//! 每个失败字段都会被报告，而不是遇到第一个错误就返回。

use serde_json::Value;

use crate::storage::{BookmarkPatch, NewBookmark, NewFolder};
use crate::utils::favicon_url;
use crate::utils::url_validator::{parse_bookmark_url, validation_error_message};

use super::types::{BookmarkPayload, FieldError, FolderPayload};

/// 校验通过的书签数据
///
/// `folder_id` / `favicon`: `None` 表示请求中未出现，`Some(None)` 表示显式 null。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBookmark {
    pub title: String,
    pub url: String,
    pub folder_id: Option<Option<i32>>,
    pub favicon: Option<Option<String>>,
}

impl ValidBookmark {
    /// 创建时 favicon 为空则由 URL 推导
    pub fn into_new_bookmark(self) -> NewBookmark {
        let favicon = self
            .favicon
            .flatten()
            .filter(|f| !f.is_empty())
            .or_else(|| favicon_url(&self.url));

        NewBookmark {
            title: self.title,
            url: self.url,
            folder_id: self.folder_id.flatten(),
            favicon,
        }
    }

    pub fn into_patch(self) -> BookmarkPatch {
        BookmarkPatch {
            title: Some(self.title),
            url: Some(self.url),
            folder_id: self.folder_id,
            favicon: self.favicon,
        }
    }
}

fn required_string(
    value: Option<&Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "Required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, "Expected string"));
            None
        }
    }
}

pub fn validate_folder(payload: &FolderPayload) -> Result<NewFolder, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required_string(payload.name.as_ref(), "name", &mut errors);
    if let Some(ref name) = name
        && name.trim().is_empty()
    {
        errors.push(FieldError::new("name", "Folder name cannot be empty"));
    }

    match name {
        Some(name) if errors.is_empty() => Ok(NewFolder { name }),
        _ => Err(errors),
    }
}

pub fn validate_bookmark(payload: &BookmarkPayload) -> Result<ValidBookmark, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = required_string(payload.title.as_ref(), "title", &mut errors);
    if let Some(ref title) = title
        && title.trim().is_empty()
    {
        errors.push(FieldError::new("title", "Title cannot be empty"));
    }

    // 保存的是校验过的值：去掉首尾空白
    let url = required_string(payload.url.as_ref(), "url", &mut errors)
        .map(|url| url.trim().to_string());
    if let Some(ref url) = url
        && let Err(e) = parse_bookmark_url(url)
    {
        errors.push(FieldError::new("url", validation_error_message(&e)));
    }

    let folder_id = match &payload.folder_id {
        None => None,
        Some(Value::Null) => Some(None),
        Some(Value::Number(n)) => match n.as_i64().and_then(|v| i32::try_from(v).ok()) {
            Some(id) => Some(Some(id)),
            None => {
                errors.push(FieldError::new("folderId", "Expected integer"));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new("folderId", "Expected integer"));
            None
        }
    };

    let favicon = match &payload.favicon {
        None => None,
        Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => {
            errors.push(FieldError::new("favicon", "Expected string"));
            None
        }
    };

    match (title, url) {
        (Some(title), Some(url)) if errors.is_empty() => Ok(ValidBookmark {
            title,
            url,
            folder_id,
            favicon,
        }),
        _ => Err(errors),
    }
}
