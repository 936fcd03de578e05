//! Initial schema migration - creates the record tables.
//!
//! - `purchases`: goods/services bought from a vendor at a branch
//! - `vendor_transactions`: money moved between a branch and a vendor
//!
//! Monetary and timestamp columns are stored as text on purpose: the record
//! contract tolerates loosely typed values and the engine coerces them on
//! read.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Purchases {
    Table,
    Id,
    VendorId,
    BranchName,
    ItemName,
    Price,
    PhotoUrl,
    Note,
    CreatedAt,
}

#[derive(Iden)]
enum VendorTransactions {
    Table,
    Id,
    VendorId,
    BranchName,
    Amount,
    Comment,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Purchases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchases::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchases::VendorId).string().not_null())
                    .col(ColumnDef::new(Purchases::BranchName).string().not_null())
                    .col(ColumnDef::new(Purchases::ItemName).string().not_null())
                    .col(ColumnDef::new(Purchases::Price).string().not_null())
                    .col(ColumnDef::new(Purchases::PhotoUrl).string())
                    .col(ColumnDef::new(Purchases::Note).string())
                    .col(ColumnDef::new(Purchases::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchases-vendor_id-branch_name")
                    .table(Purchases::Table)
                    .col(Purchases::VendorId)
                    .col(Purchases::BranchName)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Vendor transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(VendorTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VendorTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VendorTransactions::VendorId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VendorTransactions::BranchName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VendorTransactions::Amount)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VendorTransactions::Comment).string())
                    .col(
                        ColumnDef::new(VendorTransactions::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-vendor_transactions-vendor_id-branch_name")
                    .table(VendorTransactions::Table)
                    .col(VendorTransactions::VendorId)
                    .col(VendorTransactions::BranchName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VendorTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        Ok(())
    }
}
