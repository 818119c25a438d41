//! Invoice repository spanning both schema variants.
//!
//! Resolution is first-match-wins: the enhanced table is probed before
//! the legacy table. This order is part of the reconciliation contract,
//! not an implementation accident.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QuerySelect, Set,
};
use uuid::Uuid;

use mandap_core::invoice::{
    EnhancedInvoice, EnhancedStatus, Invoice, LegacyInvoice, LegacyStatus,
};
use mandap_core::ledger::LedgerError;
use mandap_shared::types::{Currency, InvoiceId, Money};

use crate::entities::{
    invoices, legacy_invoices,
    sea_orm_active_enums::{InvoiceStatus, LegacyInvoiceStatus},
};

/// Input for creating an enhanced invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Customer the invoice is billed to.
    pub customer_name: String,
    /// Invoice total (positive, minor units).
    pub total: Money,
}

/// Invoice repository for both schema variants.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an enhanced invoice with nothing paid yet.
    ///
    /// Legacy invoices are migrated data only and are never created
    /// through this repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_enhanced(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<EnhancedInvoice, LedgerError> {
        if !input.total.is_positive() {
            return Err(LedgerError::AmountNotPositive);
        }

        let now = Utc::now();
        let id = InvoiceId::new();

        let model = invoices::ActiveModel {
            id: Set(id.into_inner()),
            customer_name: Set(input.customer_name.clone()),
            total_minor: Set(input.total.minor),
            paid_minor: Set(0),
            currency: Set(input.total.currency.to_string()),
            status: Set(InvoiceStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        enhanced_to_domain(inserted)
    }

    /// Finds an invoice by ID, probing the enhanced schema first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn find(&self, id: Uuid) -> Result<Option<Invoice>, LedgerError> {
        resolve_invoice(&self.db, id, false).await
    }
}

/// Resolves an invoice ID against both schemas, enhanced first.
///
/// With `for_update`, the matched row is locked (`SELECT ... FOR
/// UPDATE`) so concurrent reconciliations against the same invoice
/// serialize instead of losing updates.
pub(crate) async fn resolve_invoice<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    for_update: bool,
) -> Result<Option<Invoice>, LedgerError> {
    let mut enhanced_query = invoices::Entity::find_by_id(id);
    if for_update {
        enhanced_query = enhanced_query.lock_exclusive();
    }
    if let Some(model) = enhanced_query.one(conn).await.map_err(db_err)? {
        return Ok(Some(Invoice::Enhanced(enhanced_to_domain(model)?)));
    }

    let mut legacy_query = legacy_invoices::Entity::find_by_id(id);
    if for_update {
        legacy_query = legacy_query.lock_exclusive();
    }
    if let Some(model) = legacy_query.one(conn).await.map_err(db_err)? {
        return Ok(Some(Invoice::Legacy(legacy_to_domain(model))));
    }

    Ok(None)
}

/// Writes an invoice's derived paid/balance/status fields back to its row.
pub(crate) async fn persist_invoice<C: ConnectionTrait>(
    conn: &C,
    invoice: &Invoice,
) -> Result<(), LedgerError> {
    let now = Utc::now();

    match invoice {
        Invoice::Enhanced(inv) => {
            let model = invoices::ActiveModel {
                id: Set(inv.id.into_inner()),
                paid_minor: Set(inv.paid.minor),
                status: Set(enhanced_status_to_entity(inv.status)),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            model.update(conn).await.map_err(db_err)?;
        }
        Invoice::Legacy(inv) => {
            let model = legacy_invoices::ActiveModel {
                id: Set(inv.id.into_inner()),
                balance_amount: Set(inv.balance_amount),
                advance_amount: Set(inv.advance_amount),
                status: Set(legacy_status_to_entity(inv.status)),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            model.update(conn).await.map_err(db_err)?;
        }
    }

    Ok(())
}

// ============================================================================
// Model <-> Domain Mapping
// ============================================================================

pub(crate) fn enhanced_to_domain(model: invoices::Model) -> Result<EnhancedInvoice, LedgerError> {
    let currency = parse_currency(&model.currency)?;
    Ok(EnhancedInvoice {
        id: InvoiceId::from_uuid(model.id),
        customer_name: model.customer_name,
        total: Money::new(model.total_minor, currency),
        paid: Money::new(model.paid_minor, currency),
        status: match model.status {
            InvoiceStatus::Pending => EnhancedStatus::Pending,
            InvoiceStatus::SemiPaid => EnhancedStatus::SemiPaid,
            InvoiceStatus::Paid => EnhancedStatus::Paid,
        },
    })
}

pub(crate) fn legacy_to_domain(model: legacy_invoices::Model) -> LegacyInvoice {
    LegacyInvoice {
        id: InvoiceId::from_uuid(model.id),
        customer_name: model.customer_name,
        total: model.total,
        balance_amount: model.balance_amount,
        advance_amount: model.advance_amount,
        status: match model.status {
            LegacyInvoiceStatus::Pending => LegacyStatus::Pending,
            LegacyInvoiceStatus::Paid => LegacyStatus::Paid,
        },
    }
}

pub(crate) const fn enhanced_status_to_entity(status: EnhancedStatus) -> InvoiceStatus {
    match status {
        EnhancedStatus::Pending => InvoiceStatus::Pending,
        EnhancedStatus::SemiPaid => InvoiceStatus::SemiPaid,
        EnhancedStatus::Paid => InvoiceStatus::Paid,
    }
}

pub(crate) const fn legacy_status_to_entity(status: LegacyStatus) -> LegacyInvoiceStatus {
    match status {
        LegacyStatus::Pending => LegacyInvoiceStatus::Pending,
        LegacyStatus::Paid => LegacyInvoiceStatus::Paid,
    }
}

pub(crate) fn parse_currency(code: &str) -> Result<Currency, LedgerError> {
    code.parse()
        .map_err(|e: String| LedgerError::Internal(format!("stored currency invalid: {e}")))
}

pub(crate) fn db_err(err: sea_orm::DbErr) -> LedgerError {
    LedgerError::Database(err.to_string())
}
