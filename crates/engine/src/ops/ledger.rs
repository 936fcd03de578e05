use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{
    LedgerStore, Purchase, ResultEngine, VendorLedger, VendorTransaction, purchases, store,
    vendor_transactions,
};

use super::Engine;

impl LedgerStore for Engine {
    async fn purchases_for(
        &self,
        vendor_id: &str,
        branch_name: &str,
    ) -> ResultEngine<Vec<Purchase>> {
        let models: Vec<purchases::Model> = purchases::Entity::find()
            .filter(purchases::Column::VendorId.eq(vendor_id))
            .filter(purchases::Column::BranchName.eq(branch_name))
            .order_by_desc(purchases::Column::CreatedAt)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Purchase::from).collect())
    }

    async fn vendor_transactions_for(
        &self,
        vendor_id: &str,
        branch_name: &str,
    ) -> ResultEngine<Vec<VendorTransaction>> {
        let models: Vec<vendor_transactions::Model> = vendor_transactions::Entity::find()
            .filter(vendor_transactions::Column::VendorId.eq(vendor_id))
            .filter(vendor_transactions::Column::BranchName.eq(branch_name))
            .order_by_desc(vendor_transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(VendorTransaction::from).collect())
    }
}

impl Engine {
    /// Merged ledger and net balance for one `(vendor, branch)` pair.
    ///
    /// Both record reads run concurrently; either failure fails the whole
    /// query. See [`store::vendor_ledger`].
    pub async fn vendor_ledger(
        &self,
        vendor_id: &str,
        branch_name: &str,
    ) -> ResultEngine<VendorLedger> {
        store::vendor_ledger(self, vendor_id, branch_name).await
    }
}
