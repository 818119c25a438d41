//! Account ledger routes.
//!
//! Covers entry creation (with optional invoice reconciliation), the
//! filtered report view with running balances, field correction, and
//! policy-guarded deletion.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use mandap_core::ledger::{EntryDraft, EntryKind, LedgerEntry, LedgerError};
use mandap_core::reports::{EntryWithBalance, LedgerFilter, ReportService};
use mandap_db::repositories::ledger_entry::LedgerEntryRepository;
use mandap_shared::types::{Currency, InvoiceId, Money, PageRequest};

use super::invoices::invoice_snapshot;

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger", get(list_entries))
        .route("/ledger", post(create_entry))
        .route("/ledger/{entry_id}", get(get_entry))
        .route("/ledger/{entry_id}", patch(correct_entry))
        .route("/ledger/{entry_id}", delete(delete_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the ledger report.
#[derive(Debug, Deserialize)]
pub struct ListLedgerQuery {
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD); also bounds the summary.
    pub to: Option<NaiveDate>,
    /// Filter by entry kind: "credit" or "debit".
    pub kind: Option<String>,
    /// Filter by counterparty substring (case-insensitive).
    pub counterparty: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (max 100).
    pub per_page: Option<u32>,
}

/// Request body for creating a ledger entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Entry kind: "credit" or "debit".
    pub kind: String,
    /// Amount in minor units (paise); must be positive.
    pub amount_minor: i64,
    /// ISO 4217 currency code; defaults to the configured base currency.
    pub currency: Option<String>,
    /// Why the money moved.
    pub reason: String,
    /// Optional counterparty name (exact-match key for salary cycles).
    pub counterparty: Option<String>,
    /// Date of the economic event (YYYY-MM-DD).
    pub business_date: NaiveDate,
    /// Invoice to reconcile this credit against.
    pub invoice_id: Option<Uuid>,
}

/// Request body for correcting a ledger entry.
#[derive(Debug, Deserialize)]
pub struct CorrectEntryRequest {
    /// Corrected reason.
    pub reason: Option<String>,
    /// Corrected counterparty.
    pub counterparty: Option<String>,
}

/// Response for a ledger entry.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Entry kind.
    pub kind: String,
    /// Amount in minor units.
    pub amount_minor: i64,
    /// Currency code.
    pub currency: String,
    /// Reason.
    pub reason: String,
    /// Counterparty.
    pub counterparty: Option<String>,
    /// Business date.
    pub business_date: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Invoice reference, when reconciled.
    pub invoice: Option<InvoiceRefResponse>,
}

/// Invoice reference on a reconciled entry.
#[derive(Debug, Serialize)]
pub struct InvoiceRefResponse {
    /// Invoice ID.
    pub id: Uuid,
    /// Schema the reference resolved to.
    pub schema: String,
}

/// A ledger entry annotated with its running balance.
#[derive(Debug, Serialize)]
pub struct EntryWithBalanceResponse {
    /// The entry.
    #[serde(flatten)]
    pub entry: EntryResponse,
    /// Balance of the full ledger at this entry, in minor units.
    pub running_balance: i64,
}

impl From<LedgerEntry> for EntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            kind: match entry.kind {
                EntryKind::Credit => "credit".to_string(),
                EntryKind::Debit => "debit".to_string(),
            },
            amount_minor: entry.amount.minor,
            currency: entry.amount.currency.to_string(),
            reason: entry.reason,
            counterparty: entry.counterparty,
            business_date: entry.business_date.to_string(),
            created_at: entry.created_at.to_rfc3339(),
            invoice: entry.invoice_ref.map(|r| InvoiceRefResponse {
                id: r.id.into_inner(),
                schema: match r.schema {
                    mandap_core::ledger::InvoiceSchema::Legacy => "legacy".to_string(),
                    mandap_core::ledger::InvoiceSchema::Enhanced => "enhanced".to_string(),
                },
            }),
        }
    }
}

impl From<EntryWithBalance> for EntryWithBalanceResponse {
    fn from(annotated: EntryWithBalance) -> Self {
        Self {
            entry: annotated.entry.into(),
            running_balance: annotated.running_balance,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/ledger` - Report view: filtered page with running balances plus summary.
async fn list_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListLedgerQuery>,
) -> Response {
    // An unknown kind fails validation instead of degrading to "no filter".
    let kind = match query.kind.as_deref().map(EntryKind::from_str).transpose() {
        Ok(kind) => kind,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_kind",
                    "message": "Entry kind must be 'credit' or 'debit'"
                })),
            )
                .into_response();
        }
    };

    let filter = LedgerFilter {
        date_from: query.from,
        date_to: query.to,
        kind,
        counterparty: query.counterparty,
    };
    let default_page = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(default_page.page),
        per_page: query.per_page.unwrap_or(default_page.per_page),
    };

    let repo = LedgerEntryRepository::new((*state.db).clone());
    let entries = match repo.list_all().await {
        Ok(entries) => entries,
        Err(e) => return ledger_error_response(&e),
    };

    match ReportService::ledger_report(entries, &filter, &page) {
        Ok(report) => {
            let items: Vec<EntryWithBalanceResponse> = report
                .entries
                .data
                .into_iter()
                .map(Into::into)
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "entries": items,
                    "summary": report.summary,
                    "meta": report.entries.meta
                })),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/ledger` - Create an entry; a credit with an invoice ID reconciles atomically.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEntryRequest>,
) -> Response {
    let Ok(kind) = EntryKind::from_str(&payload.kind) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_kind",
                "message": "Entry kind must be 'credit' or 'debit'"
            })),
        )
            .into_response();
    };

    let currency_code = payload
        .currency
        .unwrap_or_else(|| state.ledger_config.base_currency.clone());
    let Ok(currency) = Currency::from_str(&currency_code) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_currency",
                "message": format!("Unknown currency: {currency_code}")
            })),
        )
            .into_response();
    };

    let draft = EntryDraft {
        kind,
        amount: Money::new(payload.amount_minor, currency),
        reason: payload.reason,
        counterparty: payload.counterparty,
        business_date: payload.business_date,
        invoice_id: payload.invoice_id.map(InvoiceId::from_uuid),
    };

    let repo = LedgerEntryRepository::new((*state.db).clone());
    match repo.create(draft, auth.user_id()).await {
        Ok(outcome) => {
            info!(
                entry_id = %outcome.entry.id,
                reconciled = outcome.invoice.is_some(),
                "Ledger entry created"
            );

            let entry: EntryResponse = outcome.entry.into();
            (
                StatusCode::CREATED,
                Json(json!({
                    "entry": entry,
                    "invoice": outcome.invoice.as_ref().map(invoice_snapshot)
                })),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/ledger/{entry_id}` - Get a single entry.
async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Response {
    let repo = LedgerEntryRepository::new((*state.db).clone());

    match repo.find_by_id(entry_id).await {
        Ok(entry) => {
            let response: EntryResponse = entry.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// PATCH `/ledger/{entry_id}` - Correct reason/counterparty (privileged).
async fn correct_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<Uuid>,
    Json(payload): Json<CorrectEntryRequest>,
) -> Response {
    let repo = LedgerEntryRepository::new((*state.db).clone());

    match repo
        .correct(
            entry_id,
            payload.reason,
            payload.counterparty,
            auth.is_privileged(),
        )
        .await
    {
        Ok(entry) => {
            info!(entry_id = %entry_id, "Ledger entry corrected");
            let response: EntryResponse = entry.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// DELETE `/ledger/{entry_id}` - Delete an entry (privileged, within 24h, unreconciled).
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Response {
    let repo = LedgerEntryRepository::new((*state.db).clone());

    match repo
        .delete(
            entry_id,
            auth.is_privileged(),
            state.ledger_config.deletion_window_hours,
        )
        .await
    {
        Ok(()) => {
            info!(entry_id = %entry_id, "Ledger entry deleted");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Maps a ledger error to its HTTP response.
///
/// Storage failures are logged and hidden behind a generic message.
pub(crate) fn ledger_error_response(err: &LedgerError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if matches!(err, LedgerError::Database(_) | LedgerError::Internal(_)) {
        error!(error = %err, "Ledger operation failed");
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code().to_lowercase(),
            "message": message
        })),
    )
        .into_response()
}
