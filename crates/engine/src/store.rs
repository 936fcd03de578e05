//! Storage access seam for ledger queries.

use crate::{Purchase, ResultEngine, VendorLedger, VendorTransaction, compute_ledger};

/// Filtered read access to the two record collections backing a ledger.
///
/// Implementations return records already scoped to `(vendor_id,
/// branch_name)`; [`compute_ledger`] performs no filtering of its own. The
/// sea-orm backed [`crate::Engine`] is the production implementation; tests
/// substitute fakes.
pub trait LedgerStore {
    /// All purchases for `vendor_id` at `branch_name`.
    fn purchases_for(
        &self,
        vendor_id: &str,
        branch_name: &str,
    ) -> impl Future<Output = ResultEngine<Vec<Purchase>>> + Send;

    /// All vendor transactions for `vendor_id` at `branch_name`.
    fn vendor_transactions_for(
        &self,
        vendor_id: &str,
        branch_name: &str,
    ) -> impl Future<Output = ResultEngine<Vec<VendorTransaction>>> + Send;
}

/// Computes the ledger for one `(vendor, branch)` pair.
///
/// The two reads are independent and issued concurrently. If either fetch
/// fails the whole query fails; a partial balance would be misleading.
pub async fn vendor_ledger<S: LedgerStore>(
    store: &S,
    vendor_id: &str,
    branch_name: &str,
) -> ResultEngine<VendorLedger> {
    let (purchases, transactions) = tokio::try_join!(
        store.purchases_for(vendor_id, branch_name),
        store.vendor_transactions_for(vendor_id, branch_name),
    )?;

    Ok(compute_ledger(purchases, transactions))
}
