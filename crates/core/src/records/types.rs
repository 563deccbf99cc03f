//! Company and financial record types.

use serde::Serialize;

/// A company whose balance sheets are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    /// Company ID.
    pub id: i32,
    /// Unique company name.
    pub name: String,
    /// Group the company belongs to, if any.
    pub parent_group: Option<String>,
}

/// The four figures replaced together on every upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceFigures {
    /// Revenue.
    pub revenue: Option<f64>,
    /// Total assets.
    pub assets: Option<f64>,
    /// Total liabilities.
    pub liabilities: Option<f64>,
    /// Profit.
    pub profit: Option<f64>,
}

impl BalanceFigures {
    /// Creates figures with every field present.
    #[must_use]
    pub const fn new(revenue: f64, assets: f64, liabilities: f64, profit: f64) -> Self {
        Self {
            revenue: Some(revenue),
            assets: Some(assets),
            liabilities: Some(liabilities),
            profit: Some(profit),
        }
    }
}

/// A stored balance-sheet record, keyed by (company, year).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    /// Owning company.
    pub company_id: i32,
    /// Owning company's name.
    pub company_name: String,
    /// Fiscal year.
    pub year: i32,
    /// Stored figures.
    #[serde(flatten)]
    pub figures: BalanceFigures,
}

/// Which companies a query may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    /// Every company.
    All,
    /// A single company.
    Company(i32),
}

/// Inclusive year bounds for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    /// Lowest year returned.
    pub from: Option<i32>,
    /// Highest year returned.
    pub to: Option<i32>,
}

impl YearRange {
    /// No year restriction.
    pub const ANY: Self = Self {
        from: None,
        to: None,
    };

    /// Creates a year range.
    #[must_use]
    pub const fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    /// Returns true if `year` falls inside the range.
    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
    }
}
