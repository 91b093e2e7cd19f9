//! API 路由配置

use actix_web::web;

use super::bookmarks::{
    create_bookmark, delete_bookmark, get_bookmark, list_bookmarks, update_bookmark,
};
use super::folders::{create_folder, delete_folder, get_folder, list_folders, update_folder};
use super::health::HealthService;
use super::helpers::{json_config, query_config};

/// 文件夹路由 `/folders`
///
/// 包含：
/// - GET /folders - 获取所有文件夹（带书签数）
/// - POST /folders - 创建文件夹
/// - GET /folders/{id} - 获取单个文件夹
/// - PUT /folders/{id} - 重命名文件夹
/// - DELETE /folders/{id} - 删除文件夹及其书签
pub fn folder_routes() -> actix_web::Scope {
    web::scope("/folders")
        .route("", web::get().to(list_folders))
        .route("", web::post().to(create_folder))
        .route("/{id}", web::get().to(get_folder))
        .route("/{id}", web::put().to(update_folder))
        .route("/{id}", web::delete().to(delete_folder))
}

/// 书签路由 `/bookmarks`
pub fn bookmark_routes() -> actix_web::Scope {
    web::scope("/bookmarks")
        .route("", web::get().to(list_bookmarks))
        .route("", web::post().to(create_bookmark))
        .route("/{id}", web::get().to(get_bookmark))
        .route("/{id}", web::put().to(update_bookmark))
        .route("/{id}", web::delete().to(delete_bookmark))
}

/// 挂载在 `api_prefix` 下的全部资源路由
pub fn api_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .app_data(json_config())
        .app_data(query_config())
        .service(folder_routes())
        .service(bookmark_routes())
}

/// Health 路由配置
pub fn health_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
