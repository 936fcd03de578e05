//! The module contains the `VendorTransaction` type representing money moved
//! between a branch and a vendor.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Money, util::parse_timestamp};

/// Money moved between a branch and a vendor.
///
/// Sign convention: a positive `amount` is a normal payment reducing the
/// balance; a negative `amount` is an adjustment (correction, credit). This
/// is the only place where sign carries domain meaning; classification for
/// display happens in [`crate::LedgerType::for_amount`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorTransaction {
    pub id: String,
    pub vendor_id: String,
    pub branch_name: String,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub comment: Option<String>,
    /// Raw timestamp as delivered by the store; see
    /// [`VendorTransaction::occurred_at`].
    pub created_at: String,
}

impl VendorTransaction {
    /// Parsed `created_at`, Unix epoch when unparsable.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        parse_timestamp(&self.created_at)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "vendor_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub vendor_id: String,
    pub branch_name: String,
    pub amount: String,
    pub comment: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VendorTransaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            vendor_id: model.vendor_id,
            branch_name: model.branch_name,
            amount: Money::parse_loose_str(&model.amount),
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

impl From<&VendorTransaction> for ActiveModel {
    fn from(tx: &VendorTransaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.clone()),
            vendor_id: ActiveValue::Set(tx.vendor_id.clone()),
            branch_name: ActiveValue::Set(tx.branch_name.clone()),
            amount: ActiveValue::Set(tx.amount.to_string()),
            comment: ActiveValue::Set(tx.comment.clone()),
            created_at: ActiveValue::Set(tx.created_at.clone()),
        }
    }
}
