use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::roles::Role;

// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for POST /api/auth/login. The dashboard login form sends the
/// role it was selected under; `role` stays a plain string so an unknown value
/// is reported as `unknown_role` instead of a body parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "customer1@ebms.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "customer")]
    pub role: String,
}

// --- Output Schemas ---

/// IdentityProfile
///
/// Public view of an identity. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct IdentityProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// LoginResponse
///
/// Output of a successful login. `expires_at` is in unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: i64,
    pub profile: IdentityProfile,
}

/// HealthStatus
///
/// Output of GET /api/health.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

/// ErrorBody
///
/// Uniform failure envelope. `error` is the stable machine-readable kind
/// (`route_not_found`, `unauthenticated`, `forbidden`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}
