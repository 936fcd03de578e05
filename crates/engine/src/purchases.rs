//! The module contains the `Purchase` type representing a good or service
//! bought from a vendor at a branch.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Money, util::parse_timestamp};

/// A purchase entry recorded by a branch.
///
/// `price` is always interpreted as a positive cost owed to the vendor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub vendor_id: String,
    pub branch_name: String,
    pub item_name: String,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Raw timestamp as delivered by the store; see [`Purchase::occurred_at`].
    pub created_at: String,
}

impl Purchase {
    /// Parsed `created_at`. Malformed timestamps fall back to the Unix epoch
    /// so the record sorts as oldest instead of failing the ledger.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        parse_timestamp(&self.created_at)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub vendor_id: String,
    pub branch_name: String,
    pub item_name: String,
    pub price: String,
    pub photo_url: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Purchase {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            vendor_id: model.vendor_id,
            branch_name: model.branch_name,
            item_name: model.item_name,
            price: Money::parse_loose_str(&model.price),
            photo_url: model.photo_url,
            note: model.note,
            created_at: model.created_at,
        }
    }
}

impl From<&Purchase> for ActiveModel {
    fn from(purchase: &Purchase) -> Self {
        Self {
            id: ActiveValue::Set(purchase.id.clone()),
            vendor_id: ActiveValue::Set(purchase.vendor_id.clone()),
            branch_name: ActiveValue::Set(purchase.branch_name.clone()),
            item_name: ActiveValue::Set(purchase.item_name.clone()),
            price: ActiveValue::Set(purchase.price.to_string()),
            photo_url: ActiveValue::Set(purchase.photo_url.clone()),
            note: ActiveValue::Set(purchase.note.clone()),
            created_at: ActiveValue::Set(purchase.created_at.clone()),
        }
    }
}
