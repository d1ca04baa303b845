use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attentions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Attentions::UserId).integer().not_null())
                    .col(ColumnDef::new(Attentions::PostId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Attentions::UserId)
                            .col(Attentions::PostId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attentions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Attentions {
    Table,
    UserId,
    PostId,
}
