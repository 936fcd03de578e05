//! Vendor ledger computation.
//!
//! Merges purchases and vendor transactions for one `(vendor, branch)` pair
//! into a single newest-first ledger with the net balance owed to the vendor.
//! The computation is pure: no storage access, no input mutation, no failure
//! modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, Purchase, VendorTransaction};

/// Classification of a ledger line for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerType {
    Purchase,
    Payment,
    Adjustment,
}

impl LedgerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Payment => "Payment",
            Self::Adjustment => "Adjustment",
        }
    }

    /// Sign convention for vendor transactions: a negative amount is an
    /// adjustment, everything else is a payment.
    ///
    /// This mapping is kept in one place on purpose; scattering it across
    /// callers is the easiest way to end up with double negation between
    /// creation and display.
    #[must_use]
    pub fn for_amount(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Adjustment
        } else {
            Self::Payment
        }
    }
}

impl TryFrom<&str> for LedgerType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Purchase" => Ok(Self::Purchase),
            "Payment" => Ok(Self::Payment),
            "Adjustment" => Ok(Self::Adjustment),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid ledger type: {other}"
            ))),
        }
    }
}

/// Source record behind a [`LedgerLine`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LedgerSource {
    Purchase(Purchase),
    Transaction(VendorTransaction),
}

/// A single row of the merged vendor ledger.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedgerLine {
    /// The underlying record, serialized inline.
    #[serde(flatten)]
    pub source: LedgerSource,
    pub ledger_type: LedgerType,
    /// Sort key: the record timestamp, Unix epoch when unparsable.
    pub date: DateTime<Utc>,
    /// Unsigned magnitude to display.
    pub value: Money,
}

/// The merged ledger for one `(vendor, branch)` pair.
///
/// `balance` is the net amount the branch still owes the vendor: positive
/// means the vendor is owed money, zero or negative means settled/overpaid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VendorLedger {
    pub balance: Money,
    pub ledger: Vec<LedgerLine>,
}

/// Merges the two record streams into a single ledger, newest first.
///
/// Both collections must already be filtered to the target vendor and
/// branch; filtering by identity is the storage layer's concern. Empty
/// collections are valid and yield a zero balance and an empty ledger.
///
/// `balance = Σ price − Σ amount`, where the transaction sum is signed: a
/// negative adjustment already encodes a reduction of the reduction, so it
/// increases the balance.
///
/// Ties in `date` keep a deterministic order (stable sort, purchases before
/// transactions).
#[must_use]
pub fn compute_ledger(
    purchases: Vec<Purchase>,
    transactions: Vec<VendorTransaction>,
) -> VendorLedger {
    let total_purchases = purchases
        .iter()
        .fold(Money::ZERO, |sum, purchase| sum + purchase.price);
    let total_payments = transactions
        .iter()
        .fold(Money::ZERO, |sum, tx| sum + tx.amount);
    let balance = total_purchases - total_payments;

    let mut ledger: Vec<LedgerLine> = Vec::with_capacity(purchases.len() + transactions.len());

    for purchase in purchases {
        ledger.push(LedgerLine {
            ledger_type: LedgerType::Purchase,
            date: purchase.occurred_at(),
            value: purchase.price,
            source: LedgerSource::Purchase(purchase),
        });
    }
    for tx in transactions {
        ledger.push(LedgerLine {
            ledger_type: LedgerType::for_amount(tx.amount),
            date: tx.occurred_at(),
            value: tx.amount.abs(),
            source: LedgerSource::Transaction(tx),
        });
    }

    ledger.sort_by(|a, b| b.date.cmp(&a.date));

    VendorLedger { balance, ledger }
}
