use crate::storage::{Bookmark, BookmarkWithFolder, Folder, User};
use migration::entities::{bookmark, folder, user};

/// 将 folder Model 转换为 Folder，书签数由调用方统计
pub fn model_to_folder(model: folder::Model, bookmark_count: u64) -> Folder {
    Folder {
        id: model.id,
        name: model.name,
        bookmark_count,
    }
}

pub fn model_to_bookmark(model: bookmark::Model) -> Bookmark {
    Bookmark {
        id: model.id,
        title: model.title,
        url: model.url,
        folder_id: model.folder_id,
        favicon: model.favicon,
    }
}

/// `find_also_related` 的结果转换为带文件夹名的书签
pub fn joined_to_bookmark(
    (model, folder): (bookmark::Model, Option<folder::Model>),
) -> BookmarkWithFolder {
    BookmarkWithFolder {
        bookmark: model_to_bookmark(model),
        folder_name: folder.map(|f| f.name),
    }
}

/// 将 Bookmark 转换为 ActiveModel（用于更新，主键保持不变）
pub fn bookmark_to_active_model(bookmark: &Bookmark) -> bookmark::ActiveModel {
    use sea_orm::ActiveValue::*;

    bookmark::ActiveModel {
        id: Unchanged(bookmark.id),
        title: Set(bookmark.title.clone()),
        url: Set(bookmark.url.clone()),
        folder_id: Set(bookmark.folder_id),
        favicon: Set(bookmark.favicon.clone()),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password: model.password,
    }
}
