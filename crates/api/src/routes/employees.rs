//! Employee routes, including the derived salary cycle view.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use mandap_core::payroll::{EmployeeProfile, SalaryStatus, salary_cycle};
use mandap_db::entities::employees;
use mandap_db::repositories::employee::{CreateEmployeeInput, EmployeeError, EmployeeRepository};
use mandap_db::repositories::ledger_entry::LedgerEntryRepository;
use mandap_shared::types::{Currency, Money};

use super::ledger::ledger_error_response;

/// Creates the employee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees", post(create_employee))
        .route("/employees/{employee_id}", get(get_employee))
        .route("/employees/{employee_id}/salary-cycle", get(get_salary_cycle))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an employee.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Employee name; must be unique (ledger counterparty key).
    pub name: String,
    /// Optional contact number.
    pub phone: Option<String>,
    /// Joining date (YYYY-MM-DD); anchors salary cycles.
    pub joining_date: NaiveDate,
    /// Salary per 31-day cycle, in minor units.
    pub monthly_salary_minor: i64,
    /// ISO 4217 currency code; defaults to the configured base currency.
    pub currency: Option<String>,
}

/// Query parameters for the salary cycle view.
#[derive(Debug, Deserialize)]
pub struct SalaryCycleQuery {
    /// Evaluation date; defaults to today.
    pub as_of: Option<NaiveDate>,
}

/// Response for an employee.
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    /// Employee ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Phone.
    pub phone: Option<String>,
    /// Joining date.
    pub joining_date: String,
    /// Salary per cycle in minor units.
    pub monthly_salary_minor: i64,
    /// Currency code.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(model: employees::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            joining_date: model.joining_date.to_string(),
            monthly_salary_minor: model.monthly_salary_minor,
            currency: model.currency,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/employees` - List employees.
async fn list_employees(State(state): State<AppState>, _auth: AuthUser) -> Response {
    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(models) => {
            let items: Vec<EmployeeResponse> = models.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "employees": items }))).into_response()
        }
        Err(e) => employee_error_response(&e),
    }
}

/// POST `/employees` - Create an employee.
async fn create_employee(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Response {
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

    let repo = EmployeeRepository::new((*state.db).clone());
    let input = CreateEmployeeInput {
        name: payload.name,
        phone: payload.phone,
        joining_date: payload.joining_date,
        monthly_salary: Money::new(payload.monthly_salary_minor, currency),
    };

    match repo.create(input).await {
        Ok(model) => {
            info!(employee_id = %model.id, "Employee created");
            let response: EmployeeResponse = model.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => employee_error_response(&e),
    }
}

/// GET `/employees/{employee_id}` - Get an employee.
async fn get_employee(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(employee_id): Path<Uuid>,
) -> Response {
    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.find_by_id(employee_id).await {
        Ok(model) => {
            let response: EmployeeResponse = model.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => employee_error_response(&e),
    }
}

/// GET `/employees/{employee_id}/salary-cycle` - Current 31-day cycle state.
///
/// The cycle is derived at read time from the employee's joining date
/// and the debit entries whose counterparty matches the name exactly.
async fn get_salary_cycle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(employee_id): Path<Uuid>,
    Query(query): Query<SalaryCycleQuery>,
) -> Response {
    let employee_repo = EmployeeRepository::new((*state.db).clone());
    let model = match employee_repo.find_by_id(employee_id).await {
        Ok(model) => model,
        Err(e) => return employee_error_response(&e),
    };

    let Ok(currency) = Currency::from_str(&model.currency) else {
        error!(employee_id = %employee_id, currency = %model.currency, "Stored currency invalid");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response();
    };

    let ledger_repo = LedgerEntryRepository::new((*state.db).clone());
    let entries = match ledger_repo.debits_for_counterparty(&model.name).await {
        Ok(entries) => entries,
        Err(e) => return ledger_error_response(&e),
    };

    let profile = EmployeeProfile {
        name: model.name.clone(),
        joining_date: model.joining_date,
        monthly_salary: Money::new(model.monthly_salary_minor, currency),
    };
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let cycle = salary_cycle(&profile, as_of, &entries);

    (
        StatusCode::OK,
        Json(json!({
            "employee_id": employee_id,
            "as_of": as_of.to_string(),
            "cycle_start": cycle.window.start.to_string(),
            "cycle_end": cycle.window.end.to_string(),
            "paid_minor": cycle.paid.minor,
            "due_minor": cycle.due.minor,
            "currency": currency.to_string(),
            "status": salary_status_str(cycle.status),
        })),
    )
        .into_response()
}

// ============================================================================
// Helper Functions
// ============================================================================

fn employee_error_response(err: &EmployeeError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if matches!(err, EmployeeError::Database(_)) {
        error!(error = %err, "Employee operation failed");
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

const fn salary_status_str(status: SalaryStatus) -> &'static str {
    match status {
        SalaryStatus::Paid => "paid",
        SalaryStatus::Partial => "partial",
        SalaryStatus::Due => "due",
    }
}
