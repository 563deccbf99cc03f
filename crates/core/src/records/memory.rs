//! In-memory record store used by unit tests.

use std::collections::{BTreeMap, HashSet};
use std::future::{Future, ready};
use std::sync::Mutex;

use super::{BalanceFigures, Company, FinancialRecord, RecordStore, ScopeFilter, StoreError, YearRange};

#[derive(Default)]
pub(crate) struct MemoryStore {
    companies: Vec<Company>,
    records: Mutex<BTreeMap<(i32, i32), BalanceFigures>>,
    failing_years: HashSet<i32>,
}

impl MemoryStore {
    pub(crate) fn with_companies(names: &[&str]) -> Self {
        let companies = names
            .iter()
            .zip(1..)
            .map(|(name, id)| Company {
                id,
                name: (*name).to_string(),
                parent_group: Some("Test Group".to_string()),
            })
            .collect();
        Self {
            companies,
            ..Self::default()
        }
    }

    /// Makes every upsert for `year` fail with a backend error.
    pub(crate) fn failing_on(mut self, year: i32) -> Self {
        self.failing_years.insert(year);
        self
    }

    pub(crate) fn get(&self, company_id: i32, year: i32) -> Option<BalanceFigures> {
        self.records.lock().unwrap().get(&(company_id, year)).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn write(&self, company_id: i32, year: i32, figures: BalanceFigures) -> Result<(), StoreError> {
        if self.failing_years.contains(&year) {
            return Err(StoreError::Backend(format!("write failed for {year}")));
        }
        self.records
            .lock()
            .unwrap()
            .insert((company_id, year), figures);
        Ok(())
    }

    fn company_name(&self, id: i32) -> String {
        self.companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }
}

impl RecordStore for MemoryStore {
    fn upsert(
        &self,
        company_id: i32,
        year: i32,
        figures: BalanceFigures,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        ready(self.write(company_id, year, figures))
    }

    fn upsert_by_company_name(
        &self,
        name: &str,
        year: i32,
        figures: BalanceFigures,
    ) -> impl Future<Output = Result<i32, StoreError>> + Send {
        let result = match self.companies.iter().find(|c| c.name == name) {
            Some(company) => self.write(company.id, year, figures).map(|()| company.id),
            None => Err(StoreError::CompanyNotFound(name.to_string())),
        };
        ready(result)
    }

    fn query(
        &self,
        scope: ScopeFilter,
        years: YearRange,
    ) -> impl Future<Output = Result<Vec<FinancialRecord>, StoreError>> + Send {
        let mut records: Vec<FinancialRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|((company_id, year), _)| {
                let in_scope = match scope {
                    ScopeFilter::All => true,
                    ScopeFilter::Company(id) => *company_id == id,
                };
                in_scope && years.contains(*year)
            })
            .map(|(&(company_id, year), figures)| FinancialRecord {
                company_id,
                company_name: self.company_name(company_id),
                year,
                figures: *figures,
            })
            .collect();
        records.sort_by(|a, b| {
            a.year
                .cmp(&b.year)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });
        ready(Ok(records))
    }

    fn list_companies(&self) -> impl Future<Output = Result<Vec<Company>, StoreError>> + Send {
        ready(Ok(self.companies.clone()))
    }

    fn find_company(&self, id: i32) -> impl Future<Output = Result<Option<Company>, StoreError>> + Send {
        ready(Ok(self.companies.iter().find(|c| c.id == id).cloned()))
    }

    fn find_company_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Company>, StoreError>> + Send {
        ready(Ok(self.companies.iter().find(|c| c.name == name).cloned()))
    }
}
