//! Migration: Create applications table.
//!
//! The compound unique index on (job_id, student_id) is the storage-level
//! guarantee that a student applies to a job at most once.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::JobId).uuid().not_null())
                    .col(ColumnDef::new(Applications::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Applications::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .col(ColumnDef::new(Applications::Resume).string().not_null())
                    .col(ColumnDef::new(Applications::CoverLetter).text().null())
                    .col(ColumnDef::new(Applications::Feedback).text().null())
                    .col(ColumnDef::new(Applications::AdminNotes).text().null())
                    .col(
                        ColumnDef::new(Applications::Interviews)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Offer).json_binary().null())
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One application per (job, student)
        manager
            .create_index(
                Index::create()
                    .name("uq_applications_job_student")
                    .table(Applications::Table)
                    .col(Applications::JobId)
                    .col(Applications::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_student_id")
                    .table(Applications::Table)
                    .col(Applications::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_company_id")
                    .table(Applications::Table)
                    .col(Applications::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
    JobId,
    CompanyId,
    StudentId,
    Status,
    Resume,
    CoverLetter,
    Feedback,
    AdminNotes,
    Interviews,
    Offer,
    CreatedAt,
    UpdatedAt,
}
