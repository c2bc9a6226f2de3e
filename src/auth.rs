use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::AppConfig, error::ApiError, roles::Role};

/// Claims
///
/// The payload signed into every EBMS token.
///
/// `role` is kept as a raw string so that a correctly signed token carrying a
/// role outside the closed set can be told apart from a tampered one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the identity's UUID.
    pub sub: Uuid,
    /// The role claim, one of the snake_case role names.
    pub role: String,
    /// Issued At (iat), unix seconds.
    pub iat: i64,
    /// Expiration Time (exp), unix seconds. The token is rejected once `now >= exp`.
    pub exp: i64,
}

/// Credential
///
/// The trusted result of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub identity_id: Uuid,
    pub role: Role,
    pub expires_at: i64,
}

/// A freshly signed token and the expiry it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Source of "now" for expiry checks, in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at one instant. Useful for replaying a decision exactly.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// CredentialVerifier
///
/// Mints and verifies HS256 tokens. Keys are derived once from the configured
/// secret; the verifier is cheap to clone and safe to share between requests.
#[derive(Clone)]
pub struct CredentialVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl CredentialVerifier {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self::with_clock(secret, ttl_secs, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            clock,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issues a token for `identity_id` valid for the configured TTL.
    pub fn issue(&self, identity_id: Uuid, role: Role) -> Result<String, ApiError> {
        self.issue_token(identity_id, role).map(|issued| issued.token)
    }

    /// Like `issue`, also returning the `exp` signed into the token.
    pub fn issue_token(&self, identity_id: Uuid, role: Role) -> Result<IssuedToken, ApiError> {
        let now = self.now();
        let expires_at = now.checked_add(self.ttl_secs).ok_or_else(|| {
            tracing::error!(ttl_secs = self.ttl_secs, "token lifetime overflows the expiry");
            ApiError::TokenIssue
        })?;
        let token = self.sign(&Claims {
            sub: identity_id,
            role: role.as_str().to_string(),
            iat: now,
            exp: expires_at,
        })?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Issues a token with an explicit expiry timestamp.
    pub fn issue_with_expiry(
        &self,
        identity_id: Uuid,
        role: Role,
        expires_at: i64,
    ) -> Result<String, ApiError> {
        self.sign(&Claims {
            sub: identity_id,
            role: role.as_str().to_string(),
            iat: self.now(),
            exp: expires_at,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            ApiError::TokenIssue
        })
    }

    /// Verifies `token` against the verifier's clock.
    pub fn verify(&self, token: &str) -> Result<Credential, ApiError> {
        self.verify_at(token, self.now())
    }

    /// Verifies `token` as of `now`.
    ///
    /// Checks run in a fixed order: signature and claim decoding, then expiry,
    /// then the role claim.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Credential, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the injected clock, without leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::Expired,
                _ => ApiError::InvalidSignature,
            })?
            .claims;

        if now >= claims.exp {
            return Err(ApiError::Expired);
        }

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| ApiError::MalformedRole)?;

        Ok(Credential {
            identity_id: claims.sub,
            role,
            expires_at: claims.exp,
        })
    }

    /// Extracts the raw token from an `Authorization: Bearer <token>` header.
    pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// BearerToken
///
/// Extractor yielding the raw bearer token, if any. It never rejects: whether a
/// missing token matters depends on the endpoint, which is only known once the
/// dispatcher has matched the route.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(
            CredentialVerifier::bearer_token(&parts.headers).map(str::to_string),
        ))
    }
}
