use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::UserId).integer().not_null())
                    .col(ColumnDef::new(Reports::ReportedUserId).integer().not_null())
                    .col(ColumnDef::new(Reports::PostId).integer().not_null())
                    .col(ColumnDef::new(Reports::CommentId).integer().not_null().default(0))
                    .col(ColumnDef::new(Reports::Reason).text().not_null())
                    .col(ColumnDef::new(Reports::Typ).string().not_null())
                    .col(ColumnDef::new(Reports::IsComment).boolean().not_null())
                    .col(ColumnDef::new(Reports::Weight).integer().not_null())
                    .col(ColumnDef::new(Reports::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookup path of the duplicate-report check
        manager
            .create_index(
                Index::create()
                    .name("idx_reports_reporter_target")
                    .table(Reports::Table)
                    .col(Reports::UserId)
                    .col(Reports::PostId)
                    .col(Reports::CommentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    UserId,
    ReportedUserId,
    PostId,
    CommentId,
    Reason,
    Typ,
    IsComment,
    Weight,
    CreatedAt,
}
