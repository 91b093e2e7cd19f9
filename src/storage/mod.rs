//! Storage engine
//!
//! `Storage` is the single source of truth for users, folders and bookmarks.
//! Two backends implement it:
//! - `MemoryStorage`: process-lifetime maps
//! - `SeaOrmStorage`: SQLite / MySQL / PostgreSQL through sea-orm
//!
//! Both enforce the same contract: folder references are checked on write,
//! folder deletion cascades atomically, and `bookmark_count` / `folder_name`
//! are computed from live data on every read.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::errors::{BookmarkError, Result};

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::{SeaOrmStorage, infer_backend_from_url};
pub use memory::MemoryStorage;
pub use models::{
    Bookmark, BookmarkPatch, BookmarkWithFolder, Folder, NewBookmark, NewFolder, NewUser, User,
};

/// 内存后端首次启动时创建的默认文件夹
pub const DEFAULT_FOLDERS: [&str; 3] = ["Development", "Learning", "Work"];

#[async_trait]
pub trait Storage: Send + Sync {
    // 用户（目前没有路由使用）
    async fn get_user(&self, id: i32) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: NewUser) -> Result<User>;

    // 文件夹
    async fn list_folders(&self) -> Result<Vec<Folder>>;
    async fn get_folder(&self, id: i32) -> Result<Option<Folder>>;
    async fn create_folder(&self, folder: NewFolder) -> Result<Folder>;
    async fn update_folder(&self, id: i32, folder: NewFolder) -> Result<Option<Folder>>;
    /// 删除文件夹及其下所有书签，返回文件夹是否存在
    async fn delete_folder(&self, id: i32) -> Result<bool>;

    // 书签
    async fn list_bookmarks(&self) -> Result<Vec<BookmarkWithFolder>>;
    async fn list_bookmarks_by_folder(&self, folder_id: i32) -> Result<Vec<BookmarkWithFolder>>;
    async fn get_bookmark(&self, id: i32) -> Result<Option<BookmarkWithFolder>>;
    async fn create_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark>;
    async fn update_bookmark(&self, id: i32, patch: BookmarkPatch) -> Result<Option<Bookmark>>;
    async fn delete_bookmark(&self, id: i32) -> Result<bool>;
    /// 标题或 URL 的大小写不敏感子串匹配
    async fn search_bookmarks(&self, term: &str) -> Result<Vec<BookmarkWithFolder>>;

    fn backend_name(&self) -> &str;

    /// 健康检查用的轻量探测
    async fn ping(&self) -> Result<()>;
}

/// 文件夹名校验（两个后端共用）
pub(crate) fn validate_folder_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BookmarkError::validation("Folder name cannot be empty"));
    }
    Ok(())
}

pub(crate) fn missing_folder(folder_id: i32) -> BookmarkError {
    BookmarkError::referential_integrity(format!("Folder {} does not exist", folder_id))
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = match config.backend.as_str() {
            "memory" => Arc::new(MemoryStorage::new()),
            "database" => {
                // 从 URL 自动推断数据库类型
                let backend_type = infer_backend_from_url(&config.database_url)?;
                let storage =
                    SeaOrmStorage::new(&config.database_url, &backend_type, config.pool_size)
                        .await?;
                Arc::new(storage)
            }
            other => {
                error!("Unknown storage backend: {}", other);
                return Err(BookmarkError::storage_plugin_not_found(format!(
                    "Unknown storage backend: {}. Supported: memory, database",
                    other
                )));
            }
        };

        if config.seed_default_folders {
            seed_default_folders(storage.as_ref()).await?;
        }

        Ok(storage)
    }
}

/// 存储为空时创建默认文件夹
pub async fn seed_default_folders(storage: &dyn Storage) -> Result<usize> {
    if !storage.list_folders().await?.is_empty() {
        return Ok(0);
    }

    for name in DEFAULT_FOLDERS {
        storage
            .create_folder(NewFolder {
                name: name.to_string(),
            })
            .await?;
    }

    info!("Seeded {} default folders", DEFAULT_FOLDERS.len());
    Ok(DEFAULT_FOLDERS.len())
}
