//! Core business logic for Sheetwise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached through the [`records::RecordStore`] trait, which the db
//! crate implements.
//!
//! # Modules
//!
//! - `auth` - Roles, principals, and password hashing
//! - `access` - Which companies a user may read or write
//! - `records` - Companies, balance-sheet records, and the store contract
//! - `extraction` - PDF table extraction and reconciliation into the store
//! - `query` - Access-scoped reads, questions, and charts
//! - `qa` - Question answering through a language model
//! - `charts` - Chart series and renderers

pub mod access;
pub mod auth;
pub mod charts;
pub mod extraction;
pub mod qa;
pub mod query;
pub mod records;
