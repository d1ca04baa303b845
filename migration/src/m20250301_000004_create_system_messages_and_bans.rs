use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create system_messages table
        manager
            .create_table(
                Table::create()
                    .table(SystemMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemMessages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemMessages::UserId).integer().not_null())
                    .col(ColumnDef::new(SystemMessages::Title).string().not_null())
                    .col(ColumnDef::new(SystemMessages::Text).text().not_null())
                    .col(
                        ColumnDef::new(SystemMessages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bans table
        manager
            .create_table(
                Table::create()
                    .table(Bans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bans::UserId).integer().not_null())
                    .col(ColumnDef::new(Bans::Reason).text().not_null())
                    .col(ColumnDef::new(Bans::ExpireAt).big_integer().not_null())
                    .col(ColumnDef::new(Bans::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bans_user_expire")
                    .table(Bans::Table)
                    .col(Bans::UserId)
                    .col(Bans::ExpireAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bans::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SystemMessages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SystemMessages {
    Table,
    Id,
    UserId,
    Title,
    Text,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Bans {
    Table,
    Id,
    UserId,
    Reason,
    ExpireAt,
    CreatedAt,
}
