//! Scoped reads over the record store.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::QueryError;
use crate::access::{is_visible, scope_filter, visible_companies};
use crate::auth::Principal;
use crate::charts::{ChartError, ChartRenderer, ChartSeries};
use crate::qa::{LanguageModel, answer};
use crate::records::{Company, FinancialRecord, RecordStore, ScopeFilter, YearRange};

/// Read operations, each filtered through the caller's access scope.
///
/// A request outside the caller's scope reads as empty rather than failing.
pub struct QueryService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> QueryService<S> {
    /// Creates a query service over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Companies the caller may see, ordered by ID.
    pub async fn list_visible_companies(&self, user: &Principal) -> Result<Vec<Company>, QueryError> {
        let all = self.store.list_companies().await?;
        Ok(visible_companies(user, &all))
    }

    /// Records visible to the caller, optionally narrowed to one company
    /// and an inclusive year range.
    ///
    /// Ordered by year, then company name.
    pub async fn query_records(
        &self,
        user: &Principal,
        company_id: Option<i32>,
        years: YearRange,
    ) -> Result<Vec<FinancialRecord>, QueryError> {
        let Some(scope) = scope_filter(user, company_id) else {
            debug!(user_id = user.id, ?company_id, "Requested company outside scope");
            return Ok(Vec::new());
        };

        Ok(self.store.query(scope, years).await?)
    }

    /// Answers `question` from every record the caller may see, optionally
    /// narrowed to one company.
    ///
    /// Language model failures come back as placeholder text.
    pub async fn answer_question<L: LanguageModel>(
        &self,
        llm: &L,
        user: &Principal,
        question: &str,
        company_id: Option<i32>,
    ) -> Result<String, QueryError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        let records = self.query_records(user, company_id, YearRange::ANY).await?;
        info!(user_id = user.id, records = records.len(), "Answering question");

        Ok(answer(llm, &records, question).await)
    }

    /// Builds the chart series for one company.
    ///
    /// An invisible company is reported exactly like a missing one.
    pub async fn chart_series(&self, user: &Principal, company_id: i32) -> Result<ChartSeries, QueryError> {
        if !is_visible(user, company_id) {
            return Err(QueryError::CompanyNotFound(company_id));
        }
        let company = self
            .store
            .find_company(company_id)
            .await?
            .ok_or(QueryError::CompanyNotFound(company_id))?;

        let records = self
            .store
            .query(ScopeFilter::Company(company_id), YearRange::ANY)
            .await?;
        if records.is_empty() {
            return Err(ChartError::NoData(company.name).into());
        }

        Ok(ChartSeries::from_records(company.name, &records))
    }

    /// Builds the chart series for one company and hands it to `renderer`.
    pub async fn render_chart<R: ChartRenderer>(
        &self,
        renderer: &R,
        user: &Principal,
        company_id: i32,
    ) -> Result<R::Output, QueryError> {
        let series = self.chart_series(user, company_id).await?;
        Ok(renderer.render(&series)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::charts::JsonChartRenderer;
    use crate::qa::fake::FakeModel;
    use crate::records::BalanceFigures;
    use crate::records::memory::MemoryStore;

    /// Reliance Retail (1), Jio Platforms (2), Reliance Industries (3),
    /// with 2021..=2023 for the first two and nothing for the third.
    async fn seeded() -> QueryService<MemoryStore> {
        let store = MemoryStore::with_companies(&["Reliance Retail", "Jio Platforms", "Reliance Industries"]);
        for company_id in [1, 2] {
            for year in 2021..=2023 {
                let base = f64::from(company_id * 1000 + year);
                store
                    .upsert(company_id, year, BalanceFigures::new(base, base, base, base))
                    .await
                    .unwrap();
            }
        }
        QueryService::new(Arc::new(store))
    }

    fn analyst() -> Principal {
        Principal::new(1, "x", Role::Analyst, Some(1))
    }

    fn admin() -> Principal {
        Principal::new(5, "ambani", Role::GroupAdmin, None)
    }

    #[tokio::test]
    async fn test_list_visible_companies() {
        let service = seeded().await;

        let own = service.list_visible_companies(&analyst()).await.unwrap();
        let all = service.list_visible_companies(&admin()).await.unwrap();

        assert_eq!(own.len(), 1);
        assert_eq!(own[0].name, "Reliance Retail");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_other_company_reads_as_empty() {
        let service = seeded().await;

        let records = service
            .query_records(&analyst(), Some(2), YearRange::ANY)
            .await
            .unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_analyst_defaults_to_own_company() {
        let service = seeded().await;

        let records = service
            .query_records(&analyst(), None, YearRange::new(Some(2022), Some(2022)))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_id, 1);
        assert_eq!(records[0].year, 2022);
    }

    #[tokio::test]
    async fn test_admin_reads_every_company_in_year_order() {
        let service = seeded().await;

        let records = service
            .query_records(&admin(), None, YearRange::new(Some(2022), None))
            .await
            .unwrap();

        let keys: Vec<(i32, &str)> = records
            .iter()
            .map(|r| (r.year, r.company_name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2022, "Jio Platforms"),
                (2022, "Reliance Retail"),
                (2023, "Jio Platforms"),
                (2023, "Reliance Retail"),
            ]
        );
    }

    #[tokio::test]
    async fn test_answer_uses_scoped_records() {
        let service = seeded().await;
        let llm = FakeModel::replying("It grew.");

        let reply = service
            .answer_question(&llm, &analyst(), "  How did revenue change?  ", None)
            .await
            .unwrap();

        assert_eq!(reply, "It grew.");
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("Reliance Retail"));
        assert!(!prompt.contains("Jio Platforms"));
        assert!(prompt.contains("Question: How did revenue change?\n"));
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let service = seeded().await;
        let llm = FakeModel::replying("unused");

        let result = service.answer_question(&llm, &admin(), "   ", None).await;

        assert!(matches!(result, Err(QueryError::EmptyQuestion)));
        assert!(llm.last_prompt().is_none());
    }

    #[tokio::test]
    async fn test_chart_series_for_visible_company() {
        let service = seeded().await;

        let series = service.chart_series(&analyst(), 1).await.unwrap();

        assert_eq!(series.company, "Reliance Retail");
        assert_eq!(series.years, vec![2021, 2022, 2023]);
        assert_eq!(series.revenue_growth_pct.len(), 3);
    }

    #[tokio::test]
    async fn test_chart_for_hidden_or_unknown_company() {
        let service = seeded().await;

        let hidden = service.chart_series(&analyst(), 2).await;
        let unknown = service.chart_series(&admin(), 99).await;

        assert!(matches!(hidden, Err(QueryError::CompanyNotFound(2))));
        assert!(matches!(unknown, Err(QueryError::CompanyNotFound(99))));
    }

    #[tokio::test]
    async fn test_chart_without_records() {
        let service = seeded().await;

        let result = service.render_chart(&JsonChartRenderer, &admin(), 3).await;

        assert!(matches!(
            result,
            Err(QueryError::Chart(ChartError::NoData(ref name))) if name == "Reliance Industries"
        ));
    }

    #[tokio::test]
    async fn test_render_chart() {
        let service = seeded().await;

        let chart = service.render_chart(&JsonChartRenderer, &admin(), 2).await.unwrap();

        assert_eq!(chart["company"], "Jio Platforms");
        assert_eq!(chart["panels"].as_array().unwrap().len(), 4);
    }
}
