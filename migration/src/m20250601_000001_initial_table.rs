use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users 表（当前没有路由使用）
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // folders 表
        manager
            .create_table(
                Table::create()
                    .table(Folder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Folder::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Folder::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // bookmarks 表，folder_id 级联删除
        manager
            .create_table(
                Table::create()
                    .table(Bookmark::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookmark::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookmark::Title).string().not_null())
                    .col(ColumnDef::new(Bookmark::Url).text().not_null())
                    .col(ColumnDef::new(Bookmark::FolderId).integer().null())
                    .col(ColumnDef::new(Bookmark::Favicon).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmarks_folder_id")
                            .from(Bookmark::Table, Bookmark::FolderId)
                            .to(Folder::Table, Folder::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 先删有外键的表
        manager
            .drop_table(Table::drop().table(Bookmark::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Folder::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Password,
}

#[derive(DeriveIden)]
enum Folder {
    #[sea_orm(iden = "folders")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Bookmark {
    #[sea_orm(iden = "bookmarks")]
    Table,
    Id,
    Title,
    Url,
    FolderId,
    Favicon,
}
