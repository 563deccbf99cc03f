//! Balance sheet repository.
//!
//! Implements the core [`RecordStore`] contract using SeaORM.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;

use crate::entities::{balance_sheets, companies};
use sheetwise_core::records::{
    BalanceFigures, Company, FinancialRecord, RecordStore, ScopeFilter, StoreError, YearRange,
};

/// Balance sheet repository implementation.
#[derive(Debug, Clone)]
pub struct BalanceSheetRepository {
    db: DatabaseConnection,
}

impl BalanceSheetRepository {
    /// Create a new balance sheet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecordStore for BalanceSheetRepository {
    async fn upsert(
        &self,
        company_id: i32,
        year: i32,
        figures: BalanceFigures,
    ) -> Result<(), StoreError> {
        let model = balance_sheets::ActiveModel {
            company_id: Set(company_id),
            year: Set(year),
            revenue: Set(figures.revenue),
            assets: Set(figures.assets),
            liabilities: Set(figures.liabilities),
            profit: Set(figures.profit),
            ..Default::default()
        };

        balance_sheets::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    balance_sheets::Column::CompanyId,
                    balance_sheets::Column::Year,
                ])
                .update_columns([
                    balance_sheets::Column::Revenue,
                    balance_sheets::Column::Assets,
                    balance_sheets::Column::Liabilities,
                    balance_sheets::Column::Profit,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    StoreError::CompanyNotFound(company_id.to_string())
                }
                _ => to_store_error(e),
            })?;

        debug!(company_id, year, "Upserted balance sheet");
        Ok(())
    }

    async fn upsert_by_company_name(
        &self,
        name: &str,
        year: i32,
        figures: BalanceFigures,
    ) -> Result<i32, StoreError> {
        let company = self
            .find_company_by_name(name)
            .await?
            .ok_or_else(|| StoreError::CompanyNotFound(name.to_string()))?;

        self.upsert(company.id, year, figures).await?;
        Ok(company.id)
    }

    async fn query(
        &self,
        scope: ScopeFilter,
        years: YearRange,
    ) -> Result<Vec<FinancialRecord>, StoreError> {
        let mut select = balance_sheets::Entity::find();
        if let ScopeFilter::Company(company_id) = scope {
            select = select.filter(balance_sheets::Column::CompanyId.eq(company_id));
        }
        if let Some(from) = years.from {
            select = select.filter(balance_sheets::Column::Year.gte(from));
        }
        if let Some(to) = years.to {
            select = select.filter(balance_sheets::Column::Year.lte(to));
        }

        let rows = select
            .find_also_related(companies::Entity)
            .order_by_asc(balance_sheets::Column::Year)
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await
            .map_err(to_store_error)?;

        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let models = companies::Entity::find()
            .order_by_asc(companies::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_store_error)?;

        Ok(models.into_iter().map(Company::from).collect())
    }

    async fn find_company(&self, id: i32) -> Result<Option<Company>, StoreError> {
        let model = companies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(to_store_error)?;

        Ok(model.map(Company::from))
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, StoreError> {
        let model = companies::Entity::find()
            .filter(companies::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(to_store_error)?;

        Ok(model.map(Company::from))
    }
}

fn to_store_error(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Convert a joined row to the domain record.
fn to_record((sheet, company): (balance_sheets::Model, Option<companies::Model>)) -> FinancialRecord {
    FinancialRecord {
        company_id: sheet.company_id,
        company_name: company.map(|c| c.name).unwrap_or_default(),
        year: sheet.year,
        figures: BalanceFigures {
            revenue: sheet.revenue,
            assets: sheet.assets,
            liabilities: sheet.liabilities,
            profit: sheet.profit,
        },
    }
}
