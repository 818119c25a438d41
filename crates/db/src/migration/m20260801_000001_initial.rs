//! Initial database migration.
//!
//! Creates the enum types, the ledger, both invoice tables, and the
//! employees table, plus the indexes the report queries rely on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: LEDGER
        // ============================================================
        db.execute_unprepared(LEDGER_ENTRIES_SQL).await?;

        // ============================================================
        // PART 3: INVOICES (BOTH SCHEMAS)
        // ============================================================
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(LEGACY_INVOICES_SQL).await?;

        // ============================================================
        // PART 4: EMPLOYEES
        // ============================================================
        db.execute_unprepared(EMPLOYEES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Ledger entry direction
CREATE TYPE entry_kind AS ENUM ('credit', 'debit');

-- Which invoice schema a reconciled entry resolved to
CREATE TYPE invoice_schema AS ENUM ('legacy', 'enhanced');

-- Enhanced invoice status
CREATE TYPE invoice_status AS ENUM ('pending', 'semi_paid', 'paid');

-- Legacy invoice status
CREATE TYPE legacy_invoice_status AS ENUM ('pending', 'paid');
";

const LEDGER_ENTRIES_SQL: &str = r"
CREATE TABLE ledger_entries (
    id UUID PRIMARY KEY,
    kind entry_kind NOT NULL,
    amount_minor BIGINT NOT NULL CHECK (amount_minor > 0),
    currency TEXT NOT NULL DEFAULT 'INR',
    reason TEXT NOT NULL CHECK (length(trim(reason)) > 0),
    counterparty TEXT,
    business_date DATE NOT NULL,
    invoice_id UUID,
    invoice_schema invoice_schema,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- A reconciled entry records both halves of the reference or neither
    CHECK ((invoice_id IS NULL) = (invoice_schema IS NULL))
);

-- Canonical report order: business date, then insertion time
CREATE INDEX idx_ledger_entries_canonical
    ON ledger_entries (business_date, created_at);

-- Salary cycle lookups by exact counterparty
CREATE INDEX idx_ledger_entries_counterparty
    ON ledger_entries (counterparty)
    WHERE counterparty IS NOT NULL;

CREATE INDEX idx_ledger_entries_invoice
    ON ledger_entries (invoice_id)
    WHERE invoice_id IS NOT NULL;
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY,
    customer_name TEXT NOT NULL,
    total_minor BIGINT NOT NULL CHECK (total_minor > 0),
    paid_minor BIGINT NOT NULL DEFAULT 0 CHECK (paid_minor >= 0),
    currency TEXT NOT NULL DEFAULT 'INR',
    status invoice_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const LEGACY_INVOICES_SQL: &str = r"
CREATE TABLE legacy_invoices (
    id UUID PRIMARY KEY,
    customer_name TEXT NOT NULL,
    total NUMERIC(14, 2) NOT NULL CHECK (total > 0),
    balance_amount NUMERIC(14, 2) NOT NULL CHECK (balance_amount >= 0),
    advance_amount NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (advance_amount >= 0),
    status legacy_invoice_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const EMPLOYEES_SQL: &str = r"
CREATE TABLE employees (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    phone TEXT,
    joining_date DATE NOT NULL,
    monthly_salary_minor BIGINT NOT NULL CHECK (monthly_salary_minor >= 0),
    currency TEXT NOT NULL DEFAULT 'INR',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS employees;
DROP TABLE IF EXISTS legacy_invoices;
DROP TABLE IF EXISTS invoices;
DROP TABLE IF EXISTS ledger_entries;
DROP TYPE IF EXISTS legacy_invoice_status;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS invoice_schema;
DROP TYPE IF EXISTS entry_kind;
";
