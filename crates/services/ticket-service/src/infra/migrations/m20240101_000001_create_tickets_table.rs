//! Migration: Create tickets table.

use sea_orm_migration::prelude::*;

/// Columns that get a plain b-tree index.
const INDEXED: &[(&str, Tickets)] = &[
    ("idx_tickets_status", Tickets::Status),
    ("idx_tickets_priority", Tickets::Priority),
    ("idx_tickets_assignee_id", Tickets::AssigneeId),
    ("idx_tickets_reporter_id", Tickets::ReporterId),
    ("idx_tickets_created_at", Tickets::CreatedAt),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Status and priority stay plain strings so new values need no migration
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::Title).string().not_null())
                    .col(ColumnDef::new(Tickets::Description).text().null())
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string_len(32)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(Tickets::Priority)
                            .string_len(32)
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(ColumnDef::new(Tickets::AssigneeId).string().null())
                    .col(ColumnDef::new(Tickets::ReporterId).string().not_null())
                    .col(ColumnDef::new(Tickets::Tags).text().not_null().default("[]"))
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in INDEXED {
            manager
                .create_index(
                    Index::create()
                        .name(*name)
                        .table(Tickets::Table)
                        .col(*column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes go with the table
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum Tickets {
    Table,
    Id,
    Title,
    Description,
    Status,
    Priority,
    AssigneeId,
    ReporterId,
    Tags,
    CreatedAt,
    UpdatedAt,
}
