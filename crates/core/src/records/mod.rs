//! Balance-sheet records and the store that holds them.
//!
//! Records are keyed by (company, year); writes are upserts that replace
//! all four figures at once.

mod error;
mod store;
mod types;

#[cfg(test)]
pub(crate) mod memory;

pub use error::StoreError;
pub use store::RecordStore;
pub use types::{BalanceFigures, Company, FinancialRecord, ScopeFilter, YearRange};
