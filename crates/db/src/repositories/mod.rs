//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod balance_sheet;
pub mod company;
pub mod user;

pub use balance_sheet::BalanceSheetRepository;
pub use company::CompanyRepository;
pub use user::{UserError, UserRepository, to_principal};
