//! API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error, web};
use tracing::{error, warn};

use crate::errors::BookmarkError;

use super::types::{ErrorBody, FieldError};

/// 构建 JSON 错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody {
            message: message.into(),
            errors: None,
        })
}

/// 路由层自己判定的 4xx（无效 id、资源不存在）
pub fn client_error_response(err: &BookmarkError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// 构建带字段错误的 400 响应
pub fn validation_response(message: impl Into<String>, errors: Vec<FieldError>) -> HttpResponse {
    HttpResponse::BadRequest()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody {
            message: message.into(),
            errors: Some(errors),
        })
}

/// 存储层错误 → HTTP 响应
///
/// - `invalid_message`: 输入类错误（400）使用的消息，如 "Invalid bookmark data"
/// - `failure_message`: 服务端错误（5xx）返回的通用消息，细节只写日志
pub fn storage_error_response(
    err: &BookmarkError,
    invalid_message: &str,
    failure_message: &str,
) -> HttpResponse {
    match err {
        BookmarkError::ReferentialIntegrity(msg) => {
            warn!("Rejected dangling folder reference: {}", msg);
            validation_response(invalid_message, vec![FieldError::new("folderId", msg.clone())])
        }
        // 目前只有文件夹名会在存储层被拒绝
        BookmarkError::Validation(msg) => {
            warn!("Storage validation failed: {}", msg);
            validation_response(invalid_message, vec![FieldError::new("name", msg.clone())])
        }
        _ if err.is_client_error() => client_error_response(err),
        _ => {
            error!("{} [{}]: {}", failure_message, err.code(), err.message());
            error_response(err.http_status(), failure_message)
        }
    }
}

/// 解析路径中的 id，只接受正整数
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

/// 请求体不是合法 JSON（或字段结构不对）时统一返回 400
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    warn!("Invalid JSON payload: {}", err);
    let response = error_response(StatusCode::BAD_REQUEST, "Invalid request body");
    error::InternalError::from_response(err, response).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(json_error_handler)
}

/// 查询参数无法解析（如重复的 `search`）时同样返回 JSON 错误体
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    warn!("Invalid query string: {}", err);
    let response = error_response(StatusCode::BAD_REQUEST, "Invalid query parameters");
    error::InternalError::from_response(err, response).into()
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
