//! Repository abstractions for data access.
//!
//! Each repository implements one of the core store traits on top of
//! `SeaORM`, hiding the database details from the rest of the application.

pub mod budget;
pub mod expense;
pub mod goal;
pub mod profile;

pub use budget::BudgetRepository;
pub use expense::ExpenseRepository;
pub use goal::GoalRepository;
pub use profile::ProfileRepository;

use finguru_core::store::StoreError;
use sea_orm::DbErr;

/// Maps a database failure onto the store error seen by the services.
pub(crate) fn unavailable(operation: &'static str, err: DbErr) -> StoreError {
    tracing::debug!(operation, error = %err, "Database call failed");
    StoreError::Unavailable(err.to_string())
}

/// A stored row that no longer decodes into a domain value.
pub(crate) fn corrupt(table: &'static str, detail: impl std::fmt::Display) -> StoreError {
    tracing::warn!(table, %detail, "Undecodable row");
    StoreError::Corrupt(format!("{table}: {detail}"))
}
