use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, NewPurchaseCmd, Purchase, ResultEngine, purchases};

use super::{Engine, normalize_optional_text, normalize_required, with_tx};

impl Engine {
    /// Records a purchase entry and returns its id.
    pub async fn add_purchase(&self, cmd: NewPurchaseCmd) -> ResultEngine<String> {
        let vendor_id = normalize_required(&cmd.vendor_id, "vendor_id")?;
        let branch_name = normalize_required(&cmd.branch_name, "branch_name")?;
        let item_name = normalize_required(&cmd.item_name, "item_name")?;
        if !cmd.price.is_positive() {
            return Err(EngineError::InvalidAmount("price must be > 0".to_string()));
        }

        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            vendor_id,
            branch_name,
            item_name,
            price: cmd.price,
            photo_url: normalize_optional_text(cmd.photo_url.as_deref()),
            note: normalize_optional_text(cmd.note.as_deref()),
            created_at: cmd.occurred_at.to_rfc3339(),
        };

        with_tx!(self, |db_tx| {
            purchases::ActiveModel::from(&purchase).insert(&db_tx).await?;
            Ok(purchase.id.clone())
        })
    }

    /// Deletes a purchase entry.
    pub async fn delete_purchase(&self, id: &str) -> ResultEngine<()> {
        let result = purchases::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("purchase not exists".to_string()));
        }
        Ok(())
    }
}
