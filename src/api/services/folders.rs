//! 文件夹 CRUD

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::errors::BookmarkError;
use crate::storage::Storage;

use super::helpers::{
    client_error_response, parse_id, storage_error_response, validation_response,
};
use super::types::FolderPayload;
use super::validation::validate_folder;

const INVALID_ID: &str = "Invalid folder ID";
const INVALID_DATA: &str = "Invalid folder data";
const NOT_FOUND: &str = "Folder not found";

pub async fn list_folders(storage: web::Data<Arc<dyn Storage>>) -> ActixResult<impl Responder> {
    trace!("API: request to list folders");

    match storage.list_folders().await {
        Ok(folders) => {
            trace!("API: returning {} folders", folders.len());
            Ok(HttpResponse::Ok().json(folders))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to fetch folders",
        )),
    }
}

pub async fn get_folder(
    path: web::Path<String>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let Some(id) = parse_id(&path) else {
        return Ok(client_error_response(&BookmarkError::bad_request(INVALID_ID)));
    };

    match storage.get_folder(id).await {
        Ok(Some(folder)) => Ok(HttpResponse::Ok().json(folder)),
        Ok(None) => Ok(client_error_response(&BookmarkError::not_found(NOT_FOUND))),
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to fetch folder",
        )),
    }
}

pub async fn create_folder(
    payload: web::Json<FolderPayload>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let new_folder = match validate_folder(&payload) {
        Ok(folder) => folder,
        Err(errors) => return Ok(validation_response(INVALID_DATA, errors)),
    };

    match storage.create_folder(new_folder).await {
        Ok(folder) => {
            info!("API: folder created: {} ({})", folder.id, folder.name);
            Ok(HttpResponse::Created().json(folder))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to create folder",
        )),
    }
}

pub async fn update_folder(
    path: web::Path<String>,
    payload: web::Json<FolderPayload>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let Some(id) = parse_id(&path) else {
        return Ok(client_error_response(&BookmarkError::bad_request(INVALID_ID)));
    };

    let folder = match validate_folder(&payload) {
        Ok(folder) => folder,
        Err(errors) => return Ok(validation_response(INVALID_DATA, errors)),
    };

    match storage.update_folder(id, folder).await {
        Ok(Some(folder)) => {
            info!("API: folder renamed: {} -> {}", folder.id, folder.name);
            Ok(HttpResponse::Ok().json(folder))
        }
        Ok(None) => Ok(client_error_response(&BookmarkError::not_found(NOT_FOUND))),
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to update folder",
        )),
    }
}

pub async fn delete_folder(
    path: web::Path<String>,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<impl Responder> {
    let Some(id) = parse_id(&path) else {
        return Ok(client_error_response(&BookmarkError::bad_request(INVALID_ID)));
    };

    match storage.delete_folder(id).await {
        Ok(true) => {
            info!("API: folder deleted: {}", id);
            Ok(HttpResponse::NoContent().finish())
        }
        Ok(false) => Ok(client_error_response(&BookmarkError::not_found(NOT_FOUND))),
        Err(e) => Ok(storage_error_response(
            &e,
            INVALID_DATA,
            "Failed to delete folder",
        )),
    }
}
