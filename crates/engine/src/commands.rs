//! Command structs for engine write operations.
//!
//! These types group parameters for record creation, keeping call sites
//! readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

use crate::Money;

/// Create a purchase entry.
#[derive(Clone, Debug)]
pub struct NewPurchaseCmd {
    pub vendor_id: String,
    pub branch_name: String,
    pub item_name: String,
    /// Strictly positive cost owed to the vendor.
    pub price: Money,
    pub photo_url: Option<String>,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl NewPurchaseCmd {
    #[must_use]
    pub fn new(
        vendor_id: impl Into<String>,
        branch_name: impl Into<String>,
        item_name: impl Into<String>,
        price: Money,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            branch_name: branch_name.into(),
            item_name: item_name.into(),
            price,
            photo_url: None,
            note: None,
            occurred_at,
        }
    }

    #[must_use]
    pub fn photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Record money moving between a branch and a vendor.
///
/// `amount` is a positive magnitude; whether it is stored as a payment or a
/// (negated) adjustment is decided by the engine operation it is passed to.
#[derive(Clone, Debug)]
pub struct NewVendorTransactionCmd {
    pub vendor_id: String,
    pub branch_name: String,
    pub amount: Money,
    pub comment: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl NewVendorTransactionCmd {
    #[must_use]
    pub fn new(
        vendor_id: impl Into<String>,
        branch_name: impl Into<String>,
        amount: Money,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            branch_name: branch_name.into(),
            amount,
            comment: None,
            occurred_at,
        }
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
