//! Migration: Create profiles table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Profiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::Bio).text().null())
                    .col(ColumnDef::new(Profiles::Location).string().null())
                    .col(ColumnDef::new(Profiles::Website).string().null())
                    .col(ColumnDef::new(Profiles::Skills).json_binary().not_null())
                    .col(ColumnDef::new(Profiles::Social).json_binary().not_null())
                    .col(ColumnDef::new(Profiles::StudentDetails).json_binary().null())
                    .col(ColumnDef::new(Profiles::CompanyDetails).json_binary().null())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // References are by identifier only; cascades run in the
                    // workflow layer, not as database constraints
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    UserId,
    Bio,
    Location,
    Website,
    Skills,
    Social,
    StudentDetails,
    CompanyDetails,
    CreatedAt,
    UpdatedAt,
}
