//! Employee repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use mandap_shared::types::{EmployeeId, Money};

use crate::entities::employees;

/// Error types for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    /// Employee not found.
    #[error("Employee not found: {0}")]
    NotFound(Uuid),

    /// Employee name is required.
    #[error("Employee name is required")]
    MissingName,

    /// Another employee already has this name.
    ///
    /// Names are the ledger counterparty join key, so a duplicate would
    /// silently merge two people's salary payments.
    #[error("Employee name already in use: {0}")]
    NameTaken(String),

    /// Monthly salary cannot be negative.
    #[error("Monthly salary cannot be negative")]
    NegativeSalary,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl EmployeeError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::MissingName => "MISSING_NAME",
            Self::NameTaken(_) => "NAME_TAKEN",
            Self::NegativeSalary => "NEGATIVE_SALARY",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingName | Self::NegativeSalary => 400,
            Self::NotFound(_) => 404,
            Self::NameTaken(_) => 409,
            Self::Database(_) => 500,
        }
    }
}

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Employee name; must be unique (ledger counterparty key).
    pub name: String,
    /// Optional contact number.
    pub phone: Option<String>,
    /// Date the employee joined; anchors salary cycles.
    pub joining_date: NaiveDate,
    /// Salary owed per 31-day cycle.
    pub monthly_salary: Money,
}

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already taken, or the
    /// salary is negative.
    pub async fn create(&self, input: CreateEmployeeInput) -> Result<employees::Model, EmployeeError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(EmployeeError::MissingName);
        }
        if input.monthly_salary.minor < 0 {
            return Err(EmployeeError::NegativeSalary);
        }

        let existing = employees::Entity::find()
            .filter(employees::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(EmployeeError::NameTaken(name));
        }

        let now = Utc::now();
        let model = employees::ActiveModel {
            id: Set(EmployeeId::new().into_inner()),
            name: Set(name),
            phone: Set(input.phone),
            joining_date: Set(input.joining_date),
            monthly_salary_minor: Set(input.monthly_salary.minor),
            currency: Set(input.monthly_salary.currency.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Lists all employees by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<employees::Model>, EmployeeError> {
        Ok(employees::Entity::find()
            .order_by_asc(employees::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Gets an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no employee has this ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<employees::Model, EmployeeError> {
        employees::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(EmployeeError::NotFound(id))
    }
}
