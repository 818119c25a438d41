//! Invoice routes.
//!
//! New invoices are always created in the enhanced (minor-unit) schema;
//! legacy rows exist only as migrated data. Reads resolve IDs across
//! both schemas, enhanced first.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use mandap_core::invoice::{EnhancedStatus, Invoice, LegacyStatus};
use mandap_db::repositories::invoice::{CreateInvoiceInput, InvoiceRepository};
use mandap_shared::types::{Currency, Money};

use super::ledger::ledger_error_response;

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", post(create_invoice))
        .route("/invoices/{invoice_id}", get(get_invoice))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating an enhanced invoice.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Customer the invoice is billed to.
    pub customer_name: String,
    /// Invoice total in minor units; must be positive.
    pub total_minor: i64,
    /// ISO 4217 currency code; defaults to the configured base currency.
    pub currency: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/invoices` - Create an enhanced invoice.
async fn create_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Response {
    if payload.customer_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_customer_name",
                "message": "Customer name is required"
            })),
        )
            .into_response();
    }
    if payload.total_minor <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Invoice total must be positive"
            })),
        )
            .into_response();
    }

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

    let repo = InvoiceRepository::new((*state.db).clone());
    let input = CreateInvoiceInput {
        customer_name: payload.customer_name.trim().to_string(),
        total: Money::new(payload.total_minor, currency),
    };

    match repo.create_enhanced(input).await {
        Ok(invoice) => {
            info!(invoice_id = %invoice.id, "Invoice created");
            (
                StatusCode::CREATED,
                Json(invoice_snapshot(&Invoice::Enhanced(invoice))),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/invoices/{invoice_id}` - Unified snapshot across both schemas.
async fn get_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.find(invoice_id).await {
        Ok(Some(invoice)) => (StatusCode::OK, Json(invoice_snapshot(&invoice))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "invoice_not_found",
                "message": "Invoice not found in either schema"
            })),
        )
            .into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Serializes an invoice snapshot, keeping each schema's own monetary
/// convention (minor units vs rupee decimal strings).
pub(crate) fn invoice_snapshot(invoice: &Invoice) -> serde_json::Value {
    match invoice {
        Invoice::Enhanced(inv) => json!({
            "id": inv.id.into_inner(),
            "schema": "enhanced",
            "customer_name": inv.customer_name,
            "total_minor": inv.total.minor,
            "paid_minor": inv.paid.minor,
            "currency": inv.total.currency.to_string(),
            "status": enhanced_status_str(inv.status),
        }),
        Invoice::Legacy(inv) => json!({
            "id": inv.id.into_inner(),
            "schema": "legacy",
            "customer_name": inv.customer_name,
            "total": inv.total.to_string(),
            "balance_amount": inv.balance_amount.to_string(),
            "advance_amount": inv.advance_amount.to_string(),
            "status": legacy_status_str(inv.status),
        }),
    }
}

const fn enhanced_status_str(status: EnhancedStatus) -> &'static str {
    match status {
        EnhancedStatus::Pending => "pending",
        EnhancedStatus::SemiPaid => "semi_paid",
        EnhancedStatus::Paid => "paid",
    }
}

const fn legacy_status_str(status: LegacyStatus) -> &'static str {
    match status {
        LegacyStatus::Pending => "pending",
        LegacyStatus::Paid => "paid",
    }
}
