//! User profiles, onboarding and the savings rate.

pub mod error;
pub mod service;
pub mod types;

pub use error::ProfileError;
pub use service::{ProfileService, savings_rate};
pub use types::{IncomeDraft, OnboardingDraft, ProfileView, UserProfile};
