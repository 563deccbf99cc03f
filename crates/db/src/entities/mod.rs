//! `SeaORM` entity definitions.

pub mod balance_sheets;
pub mod companies;
pub mod sea_orm_active_enums;
pub mod users;
