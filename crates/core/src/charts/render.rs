//! Chart rendering collaborators.

use serde::Serialize;
use serde_json::Value;

use super::error::ChartError;
use super::series::ChartSeries;

/// Turns a series into a presentable chart.
pub trait ChartRenderer: Send + Sync {
    /// Rendered form of a chart.
    type Output;

    /// Renders `series`.
    fn render(&self, series: &ChartSeries) -> Result<Self::Output, ChartError>;
}

/// Renders a four-panel chart description as JSON for a front-end plotting library.
///
/// Panels, in order: Revenue, Profit, Assets vs Liabilities, Revenue Growth %.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonChartRenderer;

#[derive(Serialize)]
struct Chart<'a> {
    company: &'a str,
    panels: [Panel<'a>; 4],
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum PanelKind {
    Line,
    Bar,
}

#[derive(Serialize)]
struct Panel<'a> {
    title: String,
    kind: PanelKind,
    x_label: &'static str,
    y_label: &'static str,
    x: &'a [i32],
    series: Vec<Trace<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Values<'a> {
    Figures(&'a [Option<f64>]),
    Percent(&'a [f64]),
}

#[derive(Serialize)]
struct Trace<'a> {
    name: &'static str,
    y: Values<'a>,
}

impl<'a> Panel<'a> {
    fn new(series: &'a ChartSeries, title: &str, kind: PanelKind, y_label: &'static str) -> Self {
        Self {
            title: format!("{} {title}", series.company),
            kind,
            x_label: "Year",
            y_label,
            x: &series.years,
            series: Vec::new(),
        }
    }

    fn trace(mut self, name: &'static str, y: Values<'a>) -> Self {
        self.series.push(Trace { name, y });
        self
    }
}

impl ChartRenderer for JsonChartRenderer {
    type Output = Value;

    fn render(&self, series: &ChartSeries) -> Result<Value, ChartError> {
        if series.is_empty() {
            return Err(ChartError::NoData(series.company.clone()));
        }

        let chart = Chart {
            company: &series.company,
            panels: [
                Panel::new(series, "Revenue", PanelKind::Line, "Revenue")
                    .trace("Revenue", Values::Figures(&series.revenue)),
                Panel::new(series, "Profit", PanelKind::Line, "Profit")
                    .trace("Profit", Values::Figures(&series.profit)),
                Panel::new(series, "Assets vs Liabilities", PanelKind::Bar, "Value")
                    .trace("Assets", Values::Figures(&series.assets))
                    .trace("Liabilities", Values::Figures(&series.liabilities)),
                Panel::new(series, "Revenue Growth %", PanelKind::Line, "Growth %")
                    .trace("Growth %", Values::Percent(&series.revenue_growth_pct)),
            ],
        };

        serde_json::to_value(chart).map_err(|e| ChartError::Render(e.to_string()))
    }
}
