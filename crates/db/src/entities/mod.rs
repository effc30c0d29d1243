//! `SeaORM` entity definitions.

pub mod budgets;
pub mod expenses;
pub mod goals;
pub mod user_profiles;
