//! Initial schema: budgets, expenses, goals and user profiles.
//!
//! Every table is scoped by the identity provider's user id (opaque text).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SCHEMA_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS user_profiles, goals, expenses, budgets CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r"
-- Per-user budget overrides; one row per (user, category)
CREATE TABLE budgets (
    id UUID PRIMARY KEY,
    user_id VARCHAR(128) NOT NULL,
    category VARCHAR(32) NOT NULL,
    planned NUMERIC(18, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_budgets_user_category UNIQUE (user_id, category),
    CONSTRAINT chk_budgets_planned CHECK (planned >= 0)
);

CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    user_id VARCHAR(128) NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    date DATE NOT NULL,
    category VARCHAR(32) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expenses_amount CHECK (amount > 0)
);

-- Listing is always per user by date
CREATE INDEX idx_expenses_user_date ON expenses(user_id, date, created_at);

CREATE TABLE goals (
    id UUID PRIMARY KEY,
    user_id VARCHAR(128) NOT NULL,
    title TEXT NOT NULL,
    goal_type TEXT NOT NULL,
    target NUMERIC(18, 2) NOT NULL,
    saved NUMERIC(18, 2) NOT NULL,
    deadline DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_goals_target CHECK (target > 0),
    CONSTRAINT chk_goals_saved CHECK (saved >= 0)
);

CREATE INDEX idx_goals_user_deadline ON goals(user_id, deadline);

CREATE TABLE user_profiles (
    user_id VARCHAR(128) PRIMARY KEY,
    email TEXT,
    display_name TEXT,
    monthly_income NUMERIC(18, 2) NOT NULL,
    estimated_monthly_expenses NUMERIC(18, 2) NOT NULL,
    financial_goals JSONB NOT NULL DEFAULT '[]'::jsonb,
    onboarding_completed BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
