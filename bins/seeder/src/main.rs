//! Database seeder for Mandap development and testing.
//!
//! Seeds employees, one invoice per schema, and a handful of ledger
//! entries, then prints a development bearer token for each role.
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use mandap_core::ledger::{EntryDraft, EntryKind};
use mandap_db::entities::{legacy_invoices, sea_orm_active_enums::LegacyInvoiceStatus};
use mandap_db::repositories::{
    CreateEmployeeInput, CreateInvoiceInput, EmployeeRepository, InvoiceRepository,
    LedgerEntryRepository,
};
use mandap_shared::auth::{ROLE_ADMIN, ROLE_STAFF};
use mandap_shared::types::{Currency, Money};
use mandap_shared::{JwtConfig, JwtService};

/// Legacy invoice ID (consistent for all seeds)
const LEGACY_INVOICE_ID: &str = "00000000-0000-0000-0000-00000000000a";
/// Seed actor ID recorded as created_by on ledger entries
const SEED_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = mandap_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding employees...");
    seed_employees(&db).await;

    println!("Seeding legacy invoice...");
    seed_legacy_invoice(&db).await;

    println!("Seeding enhanced invoice and ledger entries...");
    seed_ledger(&db).await;

    println!("Seeding complete!");
    print_dev_tokens();
}

fn seed_user_id() -> Uuid {
    Uuid::parse_str(SEED_USER_ID).unwrap()
}

async fn seed_employees(db: &DatabaseConnection) {
    let repo = EmployeeRepository::new(db.clone());
    let existing = repo.list().await.expect("Failed to list employees");
    if !existing.is_empty() {
        println!("  employees already present, skipping");
        return;
    }

    let employees = [
        ("Ravi Kumar", "2024-01-01", 30_000_00),
        ("Meena Shah", "2024-03-15", 25_000_00),
        ("Arjun Pillai", "2025-06-01", 18_000_00),
    ];

    for (name, joined, salary_minor) in employees {
        repo.create(CreateEmployeeInput {
            name: name.to_string(),
            phone: None,
            joining_date: joined.parse::<NaiveDate>().unwrap(),
            monthly_salary: Money::new(salary_minor, Currency::Inr),
        })
        .await
        .expect("Failed to seed employee");
    }
}

async fn seed_legacy_invoice(db: &DatabaseConnection) {
    let id = Uuid::parse_str(LEGACY_INVOICE_ID).unwrap();
    let existing = legacy_invoices::Entity::find_by_id(id)
        .one(db)
        .await
        .expect("Failed to query legacy invoices");
    if existing.is_some() {
        println!("  legacy invoice already present, skipping");
        return;
    }

    let now = Utc::now();
    legacy_invoices::ActiveModel {
        id: Set(id),
        customer_name: Set("Iyer Anniversary".to_string()),
        total: Set(Decimal::new(50_000_00, 2)),
        balance_amount: Set(Decimal::new(50_000_00, 2)),
        advance_amount: Set(Decimal::ZERO),
        status: Set(LegacyInvoiceStatus::Pending),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed legacy invoice");
}

async fn seed_ledger(db: &DatabaseConnection) {
    let ledger = LedgerEntryRepository::new(db.clone());
    if !ledger
        .list_all()
        .await
        .expect("Failed to list ledger")
        .is_empty()
    {
        println!("  ledger already has entries, skipping");
        return;
    }

    let invoices = InvoiceRepository::new(db.clone());
    let invoice = invoices
        .create_enhanced(CreateInvoiceInput {
            customer_name: "Sharma Wedding".to_string(),
            total: Money::new(2_00_000_00, Currency::Inr),
        })
        .await
        .expect("Failed to seed invoice");

    // A reconciled booking advance, a vendor payment, and a salary debit.
    let drafts = [
        EntryDraft {
            kind: EntryKind::Credit,
            amount: Money::new(50_000_00, Currency::Inr),
            reason: "Booking advance".to_string(),
            counterparty: Some("Sharma Wedding".to_string()),
            business_date: "2026-07-01".parse().unwrap(),
            invoice_id: Some(invoice.id),
        },
        EntryDraft {
            kind: EntryKind::Debit,
            amount: Money::new(12_000_00, Currency::Inr),
            reason: "Flower decoration vendor".to_string(),
            counterparty: Some("Pushpa Decorators".to_string()),
            business_date: "2026-07-05".parse().unwrap(),
            invoice_id: None,
        },
        EntryDraft {
            kind: EntryKind::Debit,
            amount: Money::new(15_000_00, Currency::Inr),
            reason: "Salary instalment".to_string(),
            counterparty: Some("Ravi Kumar".to_string()),
            business_date: "2026-07-10".parse().unwrap(),
            invoice_id: None,
        },
    ];

    for draft in drafts {
        ledger
            .create(draft, seed_user_id())
            .await
            .expect("Failed to seed ledger entry");
    }
}

fn print_dev_tokens() {
    let secret = std::env::var("MANDAP__JWT__SECRET")
        .unwrap_or_else(|_| "change-me-in-production".to_string());
    let jwt = JwtService::new(JwtConfig {
        secret,
        access_token_expires_minutes: 8 * 60,
    });

    for role in [ROLE_STAFF, ROLE_ADMIN] {
        let token = jwt
            .generate_access_token(seed_user_id(), role)
            .expect("Failed to generate dev token");
        println!("dev {role} token: {token}");
    }
}
