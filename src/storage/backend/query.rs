//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, ExprTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SelectTwo,
    sea_query::{Expr, Func, LikeExpr},
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{joined_to_bookmark, model_to_folder, model_to_user};
use crate::errors::Result;
use crate::storage::{BookmarkWithFolder, Folder, User};

use migration::entities::{bookmark, folder, user};

/// 按文件夹分组的书签数（DSL 聚合查询）
#[derive(Debug, FromQueryResult)]
struct FolderCount {
    folder_id: Option<i32>,
    count: i64,
}

/// 转义 LIKE 通配符，`\` 作为转义字符
///
/// SQLite 的 LOWER 只折叠 ASCII；MySQL/PostgreSQL 的 LOWER 会折叠 Unicode，
/// 此时用 Unicode 小写得到的结果是超集，再由 `Bookmark::matches_search` 精确过滤。
pub(super) fn like_pattern(term: &str, backend_name: &str) -> String {
    let folded = if backend_name == "sqlite" {
        term.to_ascii_lowercase()
    } else {
        term.to_lowercase()
    };

    let mut escaped = String::with_capacity(folded.len() + 2);
    escaped.push('%');
    for c in folded.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl SeaOrmStorage {
    pub(super) async fn find_user(&self, id: i32) -> Result<Option<User>> {
        Ok(user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_user))
    }

    pub(super) async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .map(model_to_user))
    }

    pub(super) async fn load_folders(&self) -> Result<Vec<Folder>> {
        let folders = folder::Entity::find()
            .order_by_asc(folder::Column::Id)
            .all(&self.db)
            .await?;

        // SELECT folder_id, COUNT(id) ... GROUP BY folder_id
        let counts: HashMap<i32, u64> = bookmark::Entity::find()
            .select_only()
            .column(bookmark::Column::FolderId)
            .column_as(bookmark::Column::Id.count(), "count")
            .filter(bookmark::Column::FolderId.is_not_null())
            .group_by(bookmark::Column::FolderId)
            .into_model::<FolderCount>()
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|row| {
                row.folder_id
                    .map(|id| (id, u64::try_from(row.count).unwrap_or(0)))
            })
            .collect();

        Ok(folders
            .into_iter()
            .map(|model| {
                let count = counts.get(&model.id).copied().unwrap_or(0);
                model_to_folder(model, count)
            })
            .collect())
    }

    pub(super) async fn find_folder(&self, id: i32) -> Result<Option<Folder>> {
        let Some(model) = folder::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let count = self.count_bookmarks_in(id).await?;
        Ok(Some(model_to_folder(model, count)))
    }

    pub(super) async fn count_bookmarks_in(&self, folder_id: i32) -> Result<u64> {
        Ok(bookmark::Entity::find()
            .filter(bookmark::Column::FolderId.eq(folder_id))
            .count(&self.db)
            .await?)
    }

    fn bookmarks_with_folder() -> SelectTwo<bookmark::Entity, folder::Entity> {
        bookmark::Entity::find()
            .find_also_related(folder::Entity)
            .order_by_asc(bookmark::Column::Id)
    }

    pub(super) async fn load_bookmarks(
        &self,
        folder_id: Option<i32>,
    ) -> Result<Vec<BookmarkWithFolder>> {
        let mut query = Self::bookmarks_with_folder();
        if let Some(folder_id) = folder_id {
            query = query.filter(bookmark::Column::FolderId.eq(folder_id));
        }

        let rows = query.all(&self.db).await?;
        Ok(rows.into_iter().map(joined_to_bookmark).collect())
    }

    pub(super) async fn find_bookmark(&self, id: i32) -> Result<Option<BookmarkWithFolder>> {
        Ok(Self::bookmarks_with_folder()
            .filter(bookmark::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .map(joined_to_bookmark))
    }

    /// 标题或 URL 模糊匹配（LOWER(col) LIKE '%term%'，大小写不敏感）
    pub(super) async fn search(&self, term: &str) -> Result<Vec<BookmarkWithFolder>> {
        let pattern = like_pattern(term, &self.backend_name);
        debug!("Searching bookmarks with pattern: {}", pattern);

        let rows = Self::bookmarks_with_folder()
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            bookmark::Entity,
                            bookmark::Column::Title,
                        ))))
                        .like(LikeExpr::new(&pattern).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            bookmark::Entity,
                            bookmark::Column::Url,
                        ))))
                        .like(LikeExpr::new(&pattern).escape('\\')),
                    ),
            )
            .all(&self.db)
            .await?;

        // 各后端的 LIKE 排序规则不同（MySQL 还忽略重音），统一按同一规则复核
        Ok(rows
            .into_iter()
            .map(joined_to_bookmark)
            .filter(|row| row.bookmark.matches_search(term))
            .collect())
    }

    /// 引用检查（可在事务内调用）
    pub(super) async fn folder_exists<C>(conn: &C, id: i32) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        Ok(folder::Entity::find_by_id(id).one(conn).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_and_lowercases() {
        assert_eq!(like_pattern("Rust", "sqlite"), "%rust%");
        assert_eq!(like_pattern("Rust", "postgres"), "%rust%");
    }

    #[test]
    fn test_like_pattern_folds_like_the_backend() {
        assert_eq!(like_pattern("CAFÉ", "sqlite"), "%cafÉ%");
        assert_eq!(like_pattern("CAFÉ", "postgres"), "%café%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off", "sqlite"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b", "sqlite"), "%a\\\\b%");
    }
}
