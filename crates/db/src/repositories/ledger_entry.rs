//! Ledger entry repository.
//!
//! Entry creation and invoice reconciliation execute inside one
//! database transaction: a crash or error between the entry insert and
//! the invoice update leaves neither applied.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use mandap_core::invoice::{Invoice, InvoiceError};
use mandap_core::ledger::{
    EntryDraft, EntryKind, InvoiceRef, InvoiceSchema, LedgerEntry, LedgerError, validate_can_delete,
    validate_can_correct, validate_correction, validate_draft,
};
use mandap_shared::types::{InvoiceId, LedgerEntryId, Money};

use crate::entities::{ledger_entries, sea_orm_active_enums};

use super::invoice::{db_err, parse_currency, persist_invoice, resolve_invoice};

/// Result of creating a ledger entry.
#[derive(Debug, Clone)]
pub struct CreateEntryOutcome {
    /// The newly created entry.
    pub entry: LedgerEntry,
    /// The reconciled invoice snapshot, when the entry was invoice-linked.
    pub invoice: Option<Invoice>,
}

/// Ledger entry repository.
#[derive(Debug, Clone)]
pub struct LedgerEntryRepository {
    db: DatabaseConnection,
}

impl LedgerEntryRepository {
    /// Creates a new ledger entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a ledger entry, reconciling a linked invoice atomically.
    ///
    /// A credit carrying an invoice ID resolves it enhanced-first, locks
    /// the row, applies the payment, and inserts the entry - all in one
    /// transaction. If the ID resolves to neither schema, nothing is
    /// written and `InvoiceNotFound` is returned. Debits and unlinked
    /// credits never touch invoices.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any write attempt, or
    /// `InvoiceNotFound`/`Database` with no partial state.
    pub async fn create(
        &self,
        draft: EntryDraft,
        created_by: Uuid,
    ) -> Result<CreateEntryOutcome, LedgerError> {
        validate_draft(&draft)?;

        let txn = self.db.begin().await.map_err(db_err)?;

        // Reconcile first so a missing invoice aborts before the insert.
        let invoice = match draft.invoice_id {
            Some(invoice_id) if draft.kind == EntryKind::Credit => {
                let mut invoice = resolve_invoice(&txn, invoice_id.into_inner(), true)
                    .await?
                    .ok_or(LedgerError::InvoiceNotFound(invoice_id.into_inner()))?;

                invoice
                    .apply_payment(draft.amount)
                    .map_err(invoice_err)?;
                persist_invoice(&txn, &invoice).await?;
                Some(invoice)
            }
            // validate_draft already rejected non-credit invoice links.
            _ => None,
        };

        let invoice_ref = invoice.as_ref().map(|inv| InvoiceRef {
            id: inv.id(),
            schema: inv.schema(),
        });

        let id = LedgerEntryId::new();
        let now = Utc::now();

        let model = ledger_entries::ActiveModel {
            id: Set(id.into_inner()),
            kind: Set(kind_to_entity(draft.kind)),
            amount_minor: Set(draft.amount.minor),
            currency: Set(draft.amount.currency.to_string()),
            reason: Set(draft.reason.clone()),
            counterparty: Set(draft.counterparty.clone()),
            business_date: Set(draft.business_date),
            invoice_id: Set(invoice_ref.map(|r| r.id.into_inner())),
            invoice_schema: Set(invoice_ref.map(|r| schema_to_entity(r.schema))),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        info!(
            entry_id = %inserted.id,
            kind = ?draft.kind,
            reconciled = invoice.is_some(),
            "Ledger entry created"
        );

        Ok(CreateEntryOutcome {
            entry: entry_to_domain(inserted)?,
            invoice,
        })
    }

    /// Lists the full ledger in canonical order.
    ///
    /// The report facade needs the complete set: running balances are
    /// folded globally before any filtering or pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        let models = ledger_entries::Entity::find()
            .order_by_asc(ledger_entries::Column::BusinessDate)
            .order_by_asc(ledger_entries::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(entry_to_domain).collect()
    }

    /// Gets a single entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if no entry has this ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<LedgerEntry, LedgerError> {
        let model = ledger_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::EntryNotFound(id))?;

        entry_to_domain(model)
    }

    /// Lists all debit entries for an exact counterparty name.
    ///
    /// Used by the salary cycle calculator; the window filter happens in
    /// the core, the sum is order-independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn debits_for_counterparty(
        &self,
        counterparty: &str,
    ) -> Result<Vec<LedgerEntry>, LedgerError> {
        let models = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::Kind.eq(sea_orm_active_enums::EntryKind::Debit))
            .filter(ledger_entries::Column::Counterparty.eq(counterparty))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(entry_to_domain).collect()
    }

    /// Corrects an entry's reason and/or counterparty.
    ///
    /// Only these two fields are correctable, and only by a privileged
    /// actor. Amounts, dates, kinds, and invoice links are immutable.
    ///
    /// # Errors
    ///
    /// Returns `NotPrivileged`, `EntryNotFound`, or a validation error.
    pub async fn correct(
        &self,
        id: Uuid,
        reason: Option<String>,
        counterparty: Option<String>,
        is_privileged: bool,
    ) -> Result<LedgerEntry, LedgerError> {
        validate_can_correct(is_privileged)?;
        validate_correction(reason.as_deref())?;

        let model = ledger_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::EntryNotFound(id))?;

        let mut active: ledger_entries::ActiveModel = model.into();
        if let Some(r) = reason {
            active.reason = Set(r);
        }
        if let Some(c) = counterparty {
            active.counterparty = Set(Some(c));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        entry_to_domain(updated)
    }

    /// Deletes an entry under the audit-retention policy.
    ///
    /// Requires a privileged actor, an entry younger than the deletion
    /// window, and no invoice link.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or the policy violation.
    pub async fn delete(
        &self,
        id: Uuid,
        is_privileged: bool,
        window_hours: i64,
    ) -> Result<(), LedgerError> {
        let model = ledger_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::EntryNotFound(id))?;

        let entry = entry_to_domain(model)?;
        validate_can_delete(&entry, Utc::now(), is_privileged, window_hours)?;

        ledger_entries::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        info!(entry_id = %id, "Ledger entry deleted");
        Ok(())
    }
}

// ============================================================================
// Model <-> Domain Mapping
// ============================================================================

pub(crate) fn entry_to_domain(model: ledger_entries::Model) -> Result<LedgerEntry, LedgerError> {
    let currency = parse_currency(&model.currency)?;

    let invoice_ref = match (model.invoice_id, model.invoice_schema) {
        (Some(id), Some(schema)) => Some(InvoiceRef {
            id: InvoiceId::from_uuid(id),
            schema: schema_to_domain(&schema),
        }),
        _ => None,
    };

    Ok(LedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        kind: kind_to_domain(&model.kind),
        amount: Money::new(model.amount_minor, currency),
        reason: model.reason,
        counterparty: model.counterparty,
        business_date: model.business_date,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        invoice_ref,
    })
}

pub(crate) const fn kind_to_entity(kind: EntryKind) -> sea_orm_active_enums::EntryKind {
    match kind {
        EntryKind::Credit => sea_orm_active_enums::EntryKind::Credit,
        EntryKind::Debit => sea_orm_active_enums::EntryKind::Debit,
    }
}

pub(crate) const fn kind_to_domain(kind: &sea_orm_active_enums::EntryKind) -> EntryKind {
    match kind {
        sea_orm_active_enums::EntryKind::Credit => EntryKind::Credit,
        sea_orm_active_enums::EntryKind::Debit => EntryKind::Debit,
    }
}

pub(crate) const fn schema_to_entity(schema: InvoiceSchema) -> sea_orm_active_enums::InvoiceSchema {
    match schema {
        InvoiceSchema::Legacy => sea_orm_active_enums::InvoiceSchema::Legacy,
        InvoiceSchema::Enhanced => sea_orm_active_enums::InvoiceSchema::Enhanced,
    }
}

pub(crate) const fn schema_to_domain(
    schema: &sea_orm_active_enums::InvoiceSchema,
) -> InvoiceSchema {
    match schema {
        sea_orm_active_enums::InvoiceSchema::Legacy => InvoiceSchema::Legacy,
        sea_orm_active_enums::InvoiceSchema::Enhanced => InvoiceSchema::Enhanced,
    }
}

fn invoice_err(err: InvoiceError) -> LedgerError {
    match err {
        InvoiceError::AmountNotPositive => LedgerError::AmountNotPositive,
        InvoiceError::CurrencyMismatch { payment, invoice } => LedgerError::CurrencyMismatch {
            expected: invoice,
            actual: payment,
        },
        InvoiceError::AmountOverflow => LedgerError::AmountOverflow,
    }
}
