use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    AppState,
    auth::CredentialVerifier,
    error::ApiError,
    identity::{self, IdentityState},
    models::{HealthStatus, LoginRequest, LoginResponse},
    roles::Role,
};

/// Public Router Module
///
/// Endpoints reachable without a credential. Login is the only place a
/// credential is minted; every other endpoint is served by the dispatcher
/// fallback and requires one.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /api/health
        // Liveness probe for monitoring and load balancers.
        .route("/api/health", get(health))
        // POST /api/auth/login
        // Exchanges email, password and role for a bearer token.
        .route("/api/auth/login", post(login))
}

/// health
///
/// [Public Route] Reports that the API process is up.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is running", body = HealthStatus))
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        message: "EBMS API is running".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// login
///
/// [Public Route] Authenticates an identity within the selected role and
/// issues a credential for it.
///
/// An unknown role or an unreadable body is a client error (400). A wrong
/// email or password is indistinguishable from a missing account (401): both
/// paths run one Argon2 verification, off the async workers.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Unknown role or malformed body", body = crate::models::ErrorBody),
        (status = 401, description = "Invalid email or password", body = crate::models::ErrorBody)
    )
)]
pub async fn login(
    State(identities): State<IdentityState>,
    State(verifier): State<CredentialVerifier>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Body rejections use the same error envelope as everything else.
    let Json(payload) = payload?;
    let role: Role = payload.role.parse()?;

    let found = identities.find_by_email(role, &payload.email).await;

    // Argon2 is CPU bound; keep it off the request workers.
    let password = payload.password;
    let identity = tokio::task::spawn_blocking(move || identity::check_password(found, &password))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| {
            tracing::info!(%role, "login rejected");
            ApiError::InvalidCredentials
        })?;

    let issued = verifier.issue_token(identity.id, identity.role)?;
    tracing::info!(identity = %identity.id, %role, "credential issued");

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at,
        profile: identity.profile(),
    }))
}
