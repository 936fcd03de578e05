use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewVendorTransactionCmd, ResultEngine, VendorTransaction, vendor_transactions,
};

use super::{Engine, normalize_optional_text, normalize_required, with_tx};

impl Engine {
    /// Records a payment to the vendor (reduces the balance).
    pub async fn add_payment(&self, cmd: NewVendorTransactionCmd) -> ResultEngine<String> {
        self.insert_vendor_transaction(cmd, false).await
    }

    /// Records an adjustment (correction, credit).
    ///
    /// Stored with a negative amount, the write-side counterpart of
    /// [`crate::LedgerType::for_amount`]; the given magnitude increases the
    /// balance.
    pub async fn add_adjustment(&self, cmd: NewVendorTransactionCmd) -> ResultEngine<String> {
        self.insert_vendor_transaction(cmd, true).await
    }

    async fn insert_vendor_transaction(
        &self,
        cmd: NewVendorTransactionCmd,
        negate: bool,
    ) -> ResultEngine<String> {
        let vendor_id = normalize_required(&cmd.vendor_id, "vendor_id")?;
        let branch_name = normalize_required(&cmd.branch_name, "branch_name")?;
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }

        let tx = VendorTransaction {
            id: Uuid::new_v4().to_string(),
            vendor_id,
            branch_name,
            amount: if negate { -cmd.amount } else { cmd.amount },
            comment: normalize_optional_text(cmd.comment.as_deref()),
            created_at: cmd.occurred_at.to_rfc3339(),
        };

        with_tx!(self, |db_tx| {
            vendor_transactions::ActiveModel::from(&tx)
                .insert(&db_tx)
                .await?;
            Ok(tx.id.clone())
        })
    }

    /// Deletes a vendor transaction (payment or adjustment).
    pub async fn delete_vendor_transaction(&self, id: &str) -> ResultEngine<()> {
        let result = vendor_transactions::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "vendor transaction not exists".to_string(),
            ));
        }
        Ok(())
    }
}
