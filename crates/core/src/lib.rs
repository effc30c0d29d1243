//! Core business logic for FinGuru.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `category` - Closed budget and expense category sets
//! - `budget` - Default category merge, upserts and spend-vs-plan rollups
//! - `expense` - Expense ledger validation, breakdowns and timeline insight
//! - `goal` - Savings goals and progress
//! - `profile` - User profile, onboarding and savings rate
//! - `store` - Persistence traits and the in-memory store

pub mod budget;
pub mod category;
pub mod expense;
pub mod goal;
pub mod profile;
pub mod store;
