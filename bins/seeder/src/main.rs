//! Database seeder for FinGuru development and testing.
//!
//! Seeds a demo user with a profile, budget overrides, a month of expenses
//! and two savings goals, then prints a bearer token for that user.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use finguru_core::category::{BudgetCategory, ExpenseCategory};
use finguru_core::expense::NewExpense;
use finguru_core::goal::NewGoal;
use finguru_core::profile::UserProfile;
use finguru_core::store::{BudgetStore, DateOrder, ExpenseStore, GoalStore, ProfileStore};
use finguru_db::{
    BudgetRepository, ExpenseRepository, GoalRepository, ProfileRepository, connect_with,
};
use finguru_shared::types::UserId;
use finguru_shared::{AppConfig, JwtConfig, JwtService};

/// Demo user id (consistent for all seeds)
const DEMO_USER_ID: &str = "demo-user";
const DEMO_EMAIL: &str = "demo@finguru.dev";
const DEMO_NAME: &str = "Demo User";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    let url = config
        .database
        .url
        .as_deref()
        .context("FINGURU__DATABASE__URL must be set to seed a database")?;

    println!("Connecting to database...");
    let db = connect_with(url, &config.database).await?;
    let user = UserId::parse(DEMO_USER_ID)?;

    println!("Seeding profile...");
    seed_profile(&ProfileRepository::new(db.clone()), &user).await?;

    println!("Seeding budgets...");
    seed_budgets(&BudgetRepository::new(db.clone()), &user).await?;

    println!("Seeding expenses...");
    seed_expenses(&ExpenseRepository::new(db.clone()), &user).await?;

    println!("Seeding goals...");
    seed_goals(&GoalRepository::new(db), &user).await?;

    let jwt = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expiry_secs: i64::try_from(config.jwt.token_expiry_secs)?,
    });
    let token = jwt.issue_token(&user, Some(DEMO_EMAIL), Some(DEMO_NAME))?;

    println!("Seeding complete!");
    println!("Demo token for `{DEMO_USER_ID}`:\n{token}");
    Ok(())
}

async fn seed_profile(repo: &ProfileRepository, user: &UserId) -> anyhow::Result<()> {
    if repo.get_profile(user).await?.is_some() {
        println!("  Profile already exists, skipping...");
        return Ok(());
    }

    let now = Utc::now();
    repo.save_profile(UserProfile {
        uid: user.clone(),
        email: Some(DEMO_EMAIL.to_string()),
        display_name: Some(DEMO_NAME.to_string()),
        monthly_income: Decimal::from(60_000),
        estimated_monthly_expenses: Decimal::from(45_000),
        financial_goals: vec!["Emergency Fund".to_string(), "Vacation/Travel".to_string()],
        onboarding_completed: true,
        created_at: now,
        updated_at: now,
    })
    .await?;
    Ok(())
}

/// Upserts are idempotent, so these run on every seed.
async fn seed_budgets(repo: &BudgetRepository, user: &UserId) -> anyhow::Result<()> {
    for (category, planned) in [
        (BudgetCategory::Food, 10_000),
        (BudgetCategory::Fun, 4_000),
        (BudgetCategory::Savings, 20_000),
    ] {
        repo.upsert_budget(user, category, Decimal::from(planned))
            .await?;
        println!("  {category}: {planned}");
    }
    Ok(())
}

async fn seed_expenses(repo: &ExpenseRepository, user: &UserId) -> anyhow::Result<()> {
    if !repo
        .list_expenses(user, DateOrder::Ascending)
        .await?
        .is_empty()
    {
        println!("  Expenses already exist, skipping...");
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);
    let rows = [
        ("Groceries", "2450.75", ExpenseCategory::Food, 0),
        ("Rent", "15000", ExpenseCategory::Housing, 0),
        ("Metro card", "1200", ExpenseCategory::Transportation, 2),
        ("Electricity", "1830.40", ExpenseCategory::Bills, 4),
        ("Dinner out", "1650", ExpenseCategory::Food, 5),
        ("Concert tickets", "3200", ExpenseCategory::Entertainment, 6),
        ("Birthday gift", "900", ExpenseCategory::Other, 9),
    ];

    for (description, amount, category, day_offset) in rows {
        let date = (month_start + Duration::days(day_offset)).min(today);
        repo.insert_expense(
            user,
            NewExpense {
                description: description.to_string(),
                amount: amount.parse()?,
                date,
                category,
                created_at: Utc::now(),
            },
        )
        .await?;
    }
    println!("  Inserted {} expenses", rows.len());
    Ok(())
}

async fn seed_goals(repo: &GoalRepository, user: &UserId) -> anyhow::Result<()> {
    if !repo.list_goals(user).await?.is_empty() {
        println!("  Goals already exist, skipping...");
        return Ok(());
    }

    let year = Utc::now().year() + 1;
    let goals = [
        ("Emergency Fund", "Emergency Fund", 100_000, 35_000, (year, 6, 30)),
        ("Trip to Goa", "Vacation/Travel", 60_000, 12_500, (year, 12, 15)),
    ];

    for (title, goal_type, target, saved, (y, m, d)) in goals {
        let deadline = NaiveDate::from_ymd_opt(y, m, d).context("invalid seed deadline")?;
        repo.insert_goal(
            user,
            NewGoal {
                title: title.to_string(),
                goal_type: goal_type.to_string(),
                target: Decimal::from(target),
                saved: Decimal::from(saved),
                deadline,
            },
        )
        .await?;
    }
    println!("  Inserted {} goals", goals.len());
    Ok(())
}
