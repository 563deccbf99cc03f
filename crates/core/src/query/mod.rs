//! Access-scoped queries: records, companies, questions, and charts.

mod error;
mod service;

pub use error::QueryError;
pub use service::QueryService;
