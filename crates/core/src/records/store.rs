//! The record store contract.

use super::error::StoreError;
use super::types::{BalanceFigures, Company, FinancialRecord, ScopeFilter, YearRange};

/// Persistence for companies and their balance-sheet records.
///
/// Implemented by the db crate over a pooled connection. Every call runs
/// to completion on its own; no transaction spans two calls.
pub trait RecordStore: Send + Sync {
    /// Inserts a record or, if (company_id, year) exists, replaces all four figures.
    fn upsert(
        &self,
        company_id: i32,
        year: i32,
        figures: BalanceFigures,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Resolves the company by name, then upserts.
    ///
    /// Returns the resolved company ID. An unknown name is a no-op that
    /// fails with `StoreError::CompanyNotFound`.
    fn upsert_by_company_name(
        &self,
        name: &str,
        year: i32,
        figures: BalanceFigures,
    ) -> impl std::future::Future<Output = Result<i32, StoreError>> + Send;

    /// Reads records ordered by year, then company name.
    fn query(
        &self,
        scope: ScopeFilter,
        years: YearRange,
    ) -> impl std::future::Future<Output = Result<Vec<FinancialRecord>, StoreError>> + Send;

    /// Lists every company, ordered by ID.
    fn list_companies(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Company>, StoreError>> + Send;

    /// Finds a company by ID.
    fn find_company(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<Option<Company>, StoreError>> + Send;

    /// Finds a company by its exact name.
    fn find_company_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Company>, StoreError>> + Send;
}
