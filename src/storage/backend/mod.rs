//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{BookmarkError, Result};
use crate::storage::{
    Bookmark, BookmarkPatch, BookmarkWithFolder, Folder, NewBookmark, NewFolder, NewUser, Storage,
    User,
};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{bookmark_to_active_model, model_to_bookmark, model_to_folder, model_to_user};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(BookmarkError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        "postgresql" => "postgres".to_string(),
        other => other.to_string(),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str, pool_size: u32) -> Result<Self> {
        if database_url.is_empty() {
            return Err(BookmarkError::database_config("database_url 未设置"));
        }

        let backend_name = normalize_backend_name(backend_name);

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, pool_size).await?
        } else {
            connect_generic(database_url, &backend_name, pool_size).await?
        };

        let storage = SeaOrmStorage { db, backend_name };

        // 运行迁移
        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.find_user(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_user_by_username(username).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.insert_user(user).await
    }

    async fn list_folders(&self) -> Result<Vec<Folder>> {
        self.load_folders().await
    }

    async fn get_folder(&self, id: i32) -> Result<Option<Folder>> {
        self.find_folder(id).await
    }

    async fn create_folder(&self, folder: NewFolder) -> Result<Folder> {
        self.insert_folder(folder).await
    }

    async fn update_folder(&self, id: i32, folder: NewFolder) -> Result<Option<Folder>> {
        self.rename_folder(id, folder).await
    }

    async fn delete_folder(&self, id: i32) -> Result<bool> {
        self.remove_folder(id).await
    }

    async fn list_bookmarks(&self) -> Result<Vec<BookmarkWithFolder>> {
        self.load_bookmarks(None).await
    }

    async fn list_bookmarks_by_folder(&self, folder_id: i32) -> Result<Vec<BookmarkWithFolder>> {
        self.load_bookmarks(Some(folder_id)).await
    }

    async fn get_bookmark(&self, id: i32) -> Result<Option<BookmarkWithFolder>> {
        self.find_bookmark(id).await
    }

    async fn create_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark> {
        self.insert_bookmark(bookmark).await
    }

    async fn update_bookmark(&self, id: i32, patch: BookmarkPatch) -> Result<Option<Bookmark>> {
        self.patch_bookmark(id, patch).await
    }

    async fn delete_bookmark(&self, id: i32) -> Result<bool> {
        self.remove_bookmark(id).await
    }

    async fn search_bookmarks(&self, term: &str) -> Result<Vec<BookmarkWithFolder>> {
        self.search(term).await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}
