//! 书签 CRUD 与搜索

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::errors::BookmarkError;
use crate::storage::Storage;

use super::helpers::{
    client_error_response, parse_id, storage_error_response, validation_response,
};
use super::types::{BookmarkPayload, BookmarkQuery};
use super::validation::validate_bookmark;

const INVALID_ID: &str = "Invalid bookmark ID";
const INVALID_DATA: &str = "Invalid bookmark data";
const NOT_FOUND: &str = "Bookmark not found";

/// 获取书签列表
///
/// 非空 `search` 优先；否则按非空 `folderId` 过滤；都没有则返回全部。
pub async fn list_bookmarks(
    query: web::Query<BookmarkQuery>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    trace!("API: request to list bookmarks with query: {:?}", query);

    let search = query.search.as_deref().filter(|s| !s.is_empty());
    let folder_id = query.folder_id.as_deref().filter(|s| !s.is_empty());

    let result = match (search, folder_id) {
        (Some(term), _) => storage.search_bookmarks(term).await,
        (None, Some(raw)) => {
            // 查询参数里的 folderId 只要求是整数；超出 id 范围的不可能匹配
            let Ok(folder_id) = raw.parse::<i64>() else {
                return Ok(client_error_response(&BookmarkError::bad_request(
                    "Invalid folder ID",
                )));
            };
            match i32::try_from(folder_id) {
                Ok(folder_id) => storage.list_bookmarks_by_folder(folder_id).await,
                Err(_) => Ok(Vec::new()),
            }
        }
        (None, None) => storage.list_bookmarks().await,
    };

    match result {
        Ok(bookmarks) => {
            trace!("API: returning {} bookmarks", bookmarks.len());
            Ok(HttpResponse::Ok().json(bookmarks))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to fetch bookmarks",
        )),
    }
}

pub async fn get_bookmark(
    path: web::Path<String>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let Some(id) = parse_id(&path) else {
        return Ok(client_error_response(&BookmarkError::bad_request(INVALID_ID)));
    };

    match storage.get_bookmark(id).await {
        Ok(Some(bookmark)) => Ok(HttpResponse::Ok().json(bookmark)),
        Ok(None) => Ok(client_error_response(&BookmarkError::not_found(NOT_FOUND))),
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to fetch bookmark",
        )),
    }
}

pub async fn create_bookmark(
    payload: web::Json<BookmarkPayload>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let new_bookmark = match validate_bookmark(&payload) {
        Ok(valid) => valid.into_new_bookmark(),
        Err(errors) => return Ok(validation_response(INVALID_DATA, errors)),
    };

    match storage.create_bookmark(new_bookmark).await {
        Ok(bookmark) => {
            info!("API: bookmark created: {} -> {}", bookmark.id, bookmark.url);
            Ok(HttpResponse::Created().json(bookmark))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to create bookmark",
        )),
    }
}

pub async fn update_bookmark(
    path: web::Path<String>,
    payload: web::Json<BookmarkPayload>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let Some(id) = parse_id(&path) else {
        return Ok(client_error_response(&BookmarkError::bad_request(INVALID_ID)));
    };

    let patch = match validate_bookmark(&payload) {
        Ok(valid) => valid.into_patch(),
        Err(errors) => return Ok(validation_response(INVALID_DATA, errors)),
    };

    match storage.update_bookmark(id, patch).await {
        Ok(Some(bookmark)) => {
            info!("API: bookmark updated: {}", bookmark.id);
            Ok(HttpResponse::Ok().json(bookmark))
        }
        Ok(None) => Ok(client_error_response(&BookmarkError::not_found(NOT_FOUND))),
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to update bookmark",
        )),
    }
}

pub async fn delete_bookmark(
    path: web::Path<String>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let Some(id) = parse_id(&path) else {
        return Ok(client_error_response(&BookmarkError::bad_request(INVALID_ID)));
    };

    match storage.delete_bookmark(id).await {
        Ok(true) => {
            info!("API: bookmark deleted: {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(client_error_response(&BookmarkError::not_found(NOT_FOUND))),
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to delete bookmark",
        )),
    }
}
