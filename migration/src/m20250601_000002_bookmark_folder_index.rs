use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按文件夹列出书签和统计书签数都走 folder_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookmarks_folder_id")
                    .table(Bookmark::Table)
                    .col(Bookmark::FolderId)
                    .to_owned(),
            )
            .await?;

        if manager.get_database_backend() == DatabaseBackend::Postgres {
            // PostgreSQL: pg_trgm + GIN 索引支持 LOWER(col) LIKE '%term%'
            let conn = manager.get_connection();

            conn.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pg_trgm")
                .await?;

            conn.execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_bookmarks_title_trgm ON bookmarks USING GIN (LOWER(title) gin_trgm_ops)",
            )
            .await?;

            conn.execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_bookmarks_url_trgm ON bookmarks USING GIN (LOWER(url) gin_trgm_ops)",
            )
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            let conn = manager.get_connection();

            conn.execute_unprepared("DROP INDEX IF EXISTS idx_bookmarks_url_trgm")
                .await?;
            conn.execute_unprepared("DROP INDEX IF EXISTS idx_bookmarks_title_trgm")
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookmarks_folder_id")
                    .table(Bookmark::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Bookmark {
    #[sea_orm(iden = "bookmarks")]
    Table,
    FolderId,
}
