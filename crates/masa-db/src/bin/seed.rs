//! # Seed Data Generator
//!
//! Populates the database with demo invoices for development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 invoices (default)
//! cargo run -p masa-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p masa-db --bin seed -- --count 60
//!
//! # Specify database path
//! cargo run -p masa-db --bin seed -- --db ./data/customers.db
//! ```
//!
//! ## Generated Invoices
//! Each invoice has:
//! - Unique company name: `{PREFIX} {SUFFIX} {INDEX}`
//! - UK mobile number: `07700` + six digits
//! - Phone type and option cycling through every combination
//! - Quantity in steps of 5 between 5 and 100
//!
//! Costs come from the standard price table, exactly as at the counter.

use std::env;

use masa_core::{
    NewInvoice, PhoneOption, PhoneType, PriceTable, MAX_QUANTITY, MIN_QUANTITY, QUANTITY_STEP,
};
use masa_db::{DbConfig, InvoiceRepository, SaveOutcome};

/// Company name parts for realistic test data
const PREFIXES: &[&str] = &[
    "Northwind", "Bluebell", "Harbour", "Kestrel", "Oakridge", "Pennine", "Riverside", "Thames",
];

const SUFFIXES: &[&str] = &["Logistics", "Builders", "Couriers", "Dental", "Estates", "Catering"];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 25;
    let mut db_path = String::from("./customers.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = match parse_count(&args[i + 1]) {
                        Ok(count) => count,
                        Err(message) => {
                            eprintln!("✗ {}", message);
                            std::process::exit(2);
                        }
                    };
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("MASA POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of invoices to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: ./customers.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 MASA POS Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Invoices: {}", count);
    println!();

    let repo = InvoiceRepository::new(DbConfig::new(&db_path));
    repo.bootstrap_schema().await?;
    println!("✓ Schema ready");

    let existing = repo.list_invoices().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} invoices", existing);
        println!("  New companies are added; existing names are skipped.");
    }

    println!();
    println!("Generating invoices...");

    let table = PriceTable::standard();
    let mut saved = 0;
    let mut skipped = 0;
    let start = std::time::Instant::now();

    for seed in 0..count {
        let invoice = generate_invoice(&table, seed)?;

        match repo.save_invoice(&invoice).await? {
            SaveOutcome::Saved(_) => saved += 1,
            SaveOutcome::Rejected(_) => skipped += 1,
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Saved {} invoices in {:?}", saved, elapsed);
    if skipped > 0 {
        println!("  Skipped {} duplicates", skipped);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Parses the `--count` value. Zero is allowed and seeds nothing.
fn parse_count(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid --count value '{}': expected a whole number", value))
}

/// Generates a single invoice with realistic data.
fn generate_invoice(table: &PriceTable, seed: usize) -> masa_core::CoreResult<NewInvoice> {
    let company = format!(
        "{} {} {:03}",
        PREFIXES[seed % PREFIXES.len()],
        SUFFIXES[(seed / PREFIXES.len()) % SUFFIXES.len()],
        seed
    );

    let number = format!("07700{:06}", seed % 1_000_000);

    let phone_type = PhoneType::ALL[seed % PhoneType::ALL.len()];
    let option = PhoneOption::ALL[(seed / PhoneType::ALL.len()) % PhoneOption::ALL.len()];

    let steps = ((MAX_QUANTITY - MIN_QUANTITY) / QUANTITY_STEP + 1) as usize;
    let quantity = MIN_QUANTITY + ((seed * 7) % steps) as u32 * QUANTITY_STEP;

    NewInvoice::new(table, &company, &number, phone_type, option, quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_rejects_bad_values() {
        assert_eq!(parse_count("60"), Ok(60));
        assert_eq!(parse_count("0"), Ok(0));

        let err = parse_count("lots").unwrap_err();
        assert!(err.contains("'lots'"));
        assert!(parse_count("-5").is_err());
        assert!(parse_count("").is_err());
    }

    #[test]
    fn test_generated_invoices_are_valid_and_distinct() {
        let table = PriceTable::standard();
        let first = generate_invoice(&table, 0).unwrap();
        let second = generate_invoice(&table, 1).unwrap();

        assert_ne!(first.company_name, second.company_name);
        assert_eq!(first.total_cost_vat, first.total_cost + first.vat);
    }
}
