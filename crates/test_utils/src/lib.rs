//! Test Utilities Crate
//!
//! Shared test infrastructure for the party master data service.
//!
//! # Modules
//!
//! - `fixtures`: Ready-made transfer objects for every entity
//! - `generators`: Property-based strategies for codes and DTOs
//! - `database`: PostgreSQL test containers with migrations applied

pub mod fixtures;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use database::*;
pub use generators::*;
