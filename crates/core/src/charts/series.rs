//! Per-company chart series.

use serde::Serialize;

use crate::records::FinancialRecord;

/// Year-ordered figures for one company, ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Company name, used in panel titles.
    pub company: String,
    /// X axis.
    pub years: Vec<i32>,
    /// Revenue per year.
    pub revenue: Vec<Option<f64>>,
    /// Profit per year.
    pub profit: Vec<Option<f64>>,
    /// Total assets per year.
    pub assets: Vec<Option<f64>>,
    /// Total liabilities per year.
    pub liabilities: Vec<Option<f64>>,
    /// Year-over-year revenue growth, in percent.
    pub revenue_growth_pct: Vec<f64>,
}

impl ChartSeries {
    /// Builds the series from records already ordered by year.
    #[must_use]
    pub fn from_records(company: impl Into<String>, records: &[FinancialRecord]) -> Self {
        let revenue: Vec<Option<f64>> = records.iter().map(|r| r.figures.revenue).collect();

        Self {
            company: company.into(),
            years: records.iter().map(|r| r.year).collect(),
            profit: records.iter().map(|r| r.figures.profit).collect(),
            assets: records.iter().map(|r| r.figures.assets).collect(),
            liabilities: records.iter().map(|r| r.figures.liabilities).collect(),
            revenue_growth_pct: growth_pct(&revenue),
            revenue,
        }
    }

    /// Returns true if there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Percentage change from each previous value; the first point is 0.
///
/// A missing value, or a previous value of zero, also gives 0.
fn growth_pct(values: &[Option<f64>]) -> Vec<f64> {
    let mut growth = Vec::with_capacity(values.len());
    if values.is_empty() {
        return growth;
    }
    growth.push(0.0);

    growth.extend(values.windows(2).map(|pair| match (pair[0], pair[1]) {
        (Some(previous), Some(current)) if previous != 0.0 => {
            (current - previous) / previous * 100.0
        }
        _ => 0.0,
    }));
    growth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::BalanceFigures;

    fn record(year: i32, revenue: Option<f64>) -> FinancialRecord {
        FinancialRecord {
            company_id: 1,
            company_name: "Reliance Retail".to_string(),
            year,
            figures: BalanceFigures {
                revenue,
                ..BalanceFigures::new(0.0, 10.0, 5.0, 1.0)
            },
        }
    }

    fn approx(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_growth_from_previous_revenue() {
        let series = ChartSeries::from_records(
            "Reliance Retail",
            &[record(2021, Some(200.0)), record(2022, Some(250.0)), record(2023, Some(200.0))],
        );

        assert_eq!(series.years, vec![2021, 2022, 2023]);
        approx(&series.revenue_growth_pct, &[0.0, 25.0, -20.0]);
        assert_eq!(series.assets, vec![Some(10.0); 3]);
    }

    #[test]
    fn test_zero_or_missing_previous_gives_zero() {
        let series = ChartSeries::from_records(
            "Jio",
            &[
                record(2020, Some(0.0)),
                record(2021, Some(100.0)),
                record(2022, None),
                record(2023, Some(50.0)),
            ],
        );

        approx(&series.revenue_growth_pct, &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = ChartSeries::from_records("Empty", &[]);
        assert!(series.is_empty());
        assert!(series.revenue_growth_pct.is_empty());
    }
}
