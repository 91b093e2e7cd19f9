//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. Writes that touch
//! more than one row, or that check a folder reference first, run inside a
//! transaction.

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, SqlErr, TransactionTrait,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{
    bookmark_to_active_model, model_to_bookmark, model_to_folder, model_to_user,
};
use crate::errors::{BookmarkError, Result};
use crate::storage::{
    Bookmark, BookmarkPatch, Folder, NewBookmark, NewFolder, NewUser, User, missing_folder,
    validate_folder_name,
};

use migration::entities::{bookmark, folder, user};

/// 外键冲突说明并发删除了目标文件夹
fn map_bookmark_write_err(err: DbErr, folder_id: Option<i32>) -> BookmarkError {
    match (err.sql_err(), folder_id) {
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) => missing_folder(id),
        _ => err.into(),
    }
}

impl SeaOrmStorage {
    pub(super) async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        if self.find_user_by_username(&new_user.username).await?.is_some() {
            return Err(BookmarkError::validation(format!(
                "Username already exists: {}",
                new_user.username
            )));
        }

        let model = user::ActiveModel {
            username: Set(new_user.username.clone()),
            password: Set(new_user.password),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => BookmarkError::validation(format!(
                "Username already exists: {}",
                new_user.username
            )),
            _ => e.into(),
        })?;

        Ok(model_to_user(model))
    }

    pub(super) async fn insert_folder(&self, new_folder: NewFolder) -> Result<Folder> {
        validate_folder_name(&new_folder.name)?;

        let model = folder::ActiveModel {
            name: Set(new_folder.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        debug!("Folder created: {} ({})", model.id, model.name);
        Ok(model_to_folder(model, 0))
    }

    pub(super) async fn rename_folder(&self, id: i32, folder: NewFolder) -> Result<Option<Folder>> {
        validate_folder_name(&folder.name)?;

        let Some(model) = folder::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.name = Set(folder.name);
        let model = active.update(&self.db).await?;

        let count = self.count_bookmarks_in(id).await?;
        Ok(Some(model_to_folder(model, count)))
    }

    /// 先删书签再删文件夹，同一事务内完成
    pub(super) async fn remove_folder(&self, id: i32) -> Result<bool> {
        let txn = self.db.begin().await?;

        if !Self::folder_exists(&txn, id).await? {
            return Ok(false);
        }

        let cascaded = bookmark::Entity::delete_many()
            .filter(bookmark::Column::FolderId.eq(id))
            .exec(&txn)
            .await?;
        folder::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!(
            "Folder deleted: {} (cascaded {} bookmarks)",
            id, cascaded.rows_affected
        );
        Ok(true)
    }

    pub(super) async fn insert_bookmark(&self, new_bookmark: NewBookmark) -> Result<Bookmark> {
        let folder_id = new_bookmark.folder_id;
        let txn = self.db.begin().await?;

        if let Some(id) = folder_id
            && !Self::folder_exists(&txn, id).await?
        {
            return Err(missing_folder(id));
        }

        let model = bookmark::ActiveModel {
            title: Set(new_bookmark.title),
            url: Set(new_bookmark.url),
            folder_id: Set(folder_id),
            favicon: Set(new_bookmark.favicon),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_bookmark_write_err(e, folder_id))?;

        txn.commit().await?;

        debug!("Bookmark created: {} -> {}", model.id, model.url);
        Ok(model_to_bookmark(model))
    }

    pub(super) async fn patch_bookmark(
        &self,
        id: i32,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>> {
        let txn = self.db.begin().await?;

        let Some(model) = bookmark::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let target_folder = patch.target_folder();
        if let Some(folder_id) = target_folder
            && !Self::folder_exists(&txn, folder_id).await?
        {
            return Err(missing_folder(folder_id));
        }

        let mut bookmark = model_to_bookmark(model);
        patch.apply(&mut bookmark);

        let model = bookmark_to_active_model(&bookmark)
            .update(&txn)
            .await
            .map_err(|e| map_bookmark_write_err(e, target_folder))?;

        txn.commit().await?;
        Ok(Some(model_to_bookmark(model)))
    }

    pub(super) async fn remove_bookmark(&self, id: i32) -> Result<bool> {
        let result = bookmark::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
