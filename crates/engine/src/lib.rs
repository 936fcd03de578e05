//! Vendor ledger engine for Khata.
//!
//! Branches buy goods from vendors and pay them back over time. The engine
//! merges the two record streams owned by the store — purchases and vendor
//! transactions — into a single newest-first ledger per `(vendor, branch)`
//! pair, with the net balance still owed to the vendor.
//!
//! The computation itself ([`compute_ledger`]) is a pure function and never
//! fails: malformed numeric fields coerce to zero and malformed timestamps
//! sort as the Unix epoch, so a ledger stays renderable even when the store
//! holds partially corrupt rows. Storage access goes through the
//! [`LedgerStore`] seam; [`Engine`] is the sea-orm backed implementation.

pub use commands::{NewPurchaseCmd, NewVendorTransactionCmd};
pub use error::EngineError;
pub use ledger::{LedgerLine, LedgerSource, LedgerType, VendorLedger, compute_ledger};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use purchases::Purchase;
pub use store::{LedgerStore, vendor_ledger};
pub use vendor_transactions::VendorTransaction;

mod commands;
mod error;
mod ledger;
mod money;
mod ops;
mod purchases;
mod store;
mod util;
mod vendor_transactions;

pub type ResultEngine<T> = Result<T, EngineError>;
