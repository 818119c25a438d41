//! Authentication claim types for the trusted auth boundary.
//!
//! Token issuance (login, password handling) lives outside this service;
//! the core only consumes the decoded claims and trusts the role signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role that may correct or delete ledger entries.
pub const ROLE_ADMIN: &str = "admin";
/// Role that may create ledger entries.
pub const ROLE_STAFF: &str = "staff";

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// The caller's role (`staff` or `admin`).
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns true if the caller holds the privileged (admin) role.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
