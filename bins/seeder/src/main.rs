//! Database seeder for local development.
//!
//! Seeds three fiscal years of budget line items across several functions,
//! fund types and agencies, including a few rows with missing taxonomy keys.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use rust_decimal::Decimal;
use statehouse_core::budget::{BudgetLineItem, LineItemQuery};
use statehouse_db::BudgetLineItemRepository;

/// Fiscal years seeded, oldest first.
const YEARS: [&str; 3] = ["2024-25", "2025-26", "2026-27"];

/// (function, fund type, financial plan category, agency, base amount in dollars)
const LINES: &[(&str, &str, &str, &str, i64)] = &[
    ("Education", "City", "Personal Services", "Department of Education", 18_400_000_000),
    ("Education", "State", "Other Than Personal Services", "Department of Education", 11_900_000_000),
    ("Education", "City", "Personal Services", "City University", 1_450_000_000),
    ("Health", "Federal", "Other Than Personal Services", "Health and Hospitals", 2_300_000_000),
    ("Health", "City", "Personal Services", "Health and Mental Hygiene", 1_900_000_000),
    ("Public Safety", "City", "Personal Services", "Police Department", 6_100_000_000),
    ("Public Safety", "City", "Personal Services", "Fire Department", 2_450_000_000),
    ("Public Safety", "State", "Other Than Personal Services", "Correction", 1_200_000_000),
    ("Social Services", "Federal", "Other Than Personal Services", "Social Services", 8_700_000_000),
    ("Social Services", "City", "Other Than Personal Services", "Homeless Services", 3_800_000_000),
    ("Infrastructure", "Capital", "Other Than Personal Services", "Transportation", 1_350_000_000),
    ("Infrastructure", "City", "Personal Services", "Sanitation", 1_950_000_000),
    ("General Government", "City", "Debt Service", "Finance", 7_600_000_000),
];

/// Growth applied per year after the first, in percent.
const GROWTH_PERCENT: [i64; 3] = [0, 3, 5];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = statehouse_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = BudgetLineItemRepository::new(db);

    let existing = repo.find(&LineItemQuery::all()).await?;
    if !existing.is_empty() {
        println!("  {} line items already present, skipping...", existing.len());
        return Ok(());
    }

    println!("Seeding budget line items...");
    let items = sample_items();
    let inserted = repo.insert_many(&items).await?;
    println!("  Inserted {inserted} line items across {} fiscal years", YEARS.len());

    println!("Seeding complete!");
    Ok(())
}

fn sample_items() -> Vec<BudgetLineItem> {
    let mut items = Vec::new();
    let mut amount_index = 0_i64;

    for (year, growth) in YEARS.iter().zip(GROWTH_PERCENT) {
        for &(function, fund_type, category, agency, base) in LINES {
            // Offset lines unevenly so rows do not move in lockstep.
            amount_index += 1;
            let wobble = Decimal::from(amount_index % 7) * Decimal::from(1_000_000);
            let amount = Decimal::from(base) * Decimal::from(100 + growth) / Decimal::from(100)
                + wobble;

            items.push(
                BudgetLineItem::new(*year, amount)
                    .with_function(function)
                    .with_fund_type(fund_type)
                    .with_fp_category(category)
                    .with_agency(agency),
            );
        }

        // Unclassified spending with no function or category.
        items.push(
            BudgetLineItem::new(*year, Decimal::from(250_000_000))
                .with_fund_type("City")
                .with_agency("Miscellaneous"),
        );
    }

    items
}
