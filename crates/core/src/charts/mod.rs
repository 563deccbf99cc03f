//! Balance-sheet charts.
//!
//! A [`ChartSeries`] holds one company's figures by year plus revenue
//! growth. Rendering is delegated to a [`ChartRenderer`].

mod error;
mod render;
mod series;

pub use error::ChartError;
pub use render::{ChartRenderer, JsonChartRenderer};
pub use series::ChartSeries;
