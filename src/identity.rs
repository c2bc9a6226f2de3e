use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use async_trait::async_trait;
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::IdentityProfile, roles::Role};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Identity
///
/// An authenticated principal. The role is fixed at creation.
#[derive(Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    password_hash: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Identity {
    /// Creates an identity, hashing `password` into an Argon2id PHC string.
    pub fn new(
        id: Uuid,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        password: &str,
    ) -> Result<Self, IdentityError> {
        Ok(Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
            password_hash: hash_password(password)?,
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_phc(&self.password_hash, password)
    }

    pub fn profile(&self) -> IdentityProfile {
        IdentityProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Hash checked when no identity matches a login, so that a missing account
/// costs the same Argon2 run as a wrong password.
static ABSENT_IDENTITY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("ebms-absent-identity").ok());

/// check_password
///
/// Returns `identity` only if `password` matches it. Without an identity the
/// password is still verified against a throwaway hash and `None` comes back.
/// CPU bound; callers on the async runtime run it via `spawn_blocking`.
pub fn check_password(identity: Option<Identity>, password: &str) -> Option<Identity> {
    match identity {
        Some(identity) => identity.verify_password(password).then_some(identity),
        None => {
            if let Some(phc) = ABSENT_IDENTITY_HASH.as_deref() {
                verify_phc(phc, password);
            }
            None
        }
    }
}

fn verify_phc(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        // Parameters are read back from the PHC string.
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn hash_password(password: &str) -> Result<String, IdentityError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| IdentityError::Hash(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| IdentityError::Hash(e.to_string()))?;

    // Interactive-login parameters: 19 MiB, 2 passes, 1 lane.
    let params = Params::new(19 * 1024, 2, 1, None).map_err(|e| IdentityError::Hash(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| IdentityError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// IdentityStore
///
/// Lookup contract used by the login route. Identities are scoped by role: the
/// same email may exist once per role, as in the EBMS schema where each actor
/// lives in its own table.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, role: Role, email: &str) -> Option<Identity>;
}

/// IdentityState
///
/// The shared, type-erased store held in the application state.
pub type IdentityState = Arc<dyn IdentityStore>;

/// InMemoryIdentityStore
///
/// A fixed set of identities held in memory. Emails compare case-insensitively.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    by_email: HashMap<(Role, String), Identity>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: Identity) {
        let key = (identity.role, identity.email.to_lowercase());
        self.by_email.insert(key, identity);
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    /// The demo accounts shown on the dashboard login page, one admin and three
    /// of each other role.
    pub fn with_demo_accounts() -> Result<Self, IdentityError> {
        let mut store = Self::new();
        for (id, email, name, role, password) in DEMO_ACCOUNTS {
            store.insert(Identity::new(
                Uuid::from_u128(*id),
                *email,
                *name,
                *role,
                password,
            )?);
        }
        Ok(store)
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_email(&self, role: Role, email: &str) -> Option<Identity> {
        self.by_email.get(&(role, email.to_lowercase())).cloned()
    }
}

type DemoAccount = (u128, &'static str, &'static str, Role, &'static str);

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    (0x1001, "admin@ebms.com", "System Administrator", Role::Admin, "admin123"),
    (0x2001, "supplier1@ebms.com", "TechCorp Electronics", Role::Supplier, "supplier123"),
    (0x2002, "supplier2@ebms.com", "Fashion Forward", Role::Supplier, "supplier123"),
    (0x2003, "supplier3@ebms.com", "Home Essentials", Role::Supplier, "supplier123"),
    (0x3001, "customer1@ebms.com", "John Smith", Role::Customer, "customer123"),
    (0x3002, "customer2@ebms.com", "Sarah Johnson", Role::Customer, "customer123"),
    (0x3003, "customer3@ebms.com", "Mike Davis", Role::Customer, "customer123"),
    (0x4001, "agent1@ebms.com", "Alex Rodriguez", Role::DeliveryAgent, "agent123"),
    (0x4002, "agent2@ebms.com", "Maria Garcia", Role::DeliveryAgent, "agent123"),
    (0x4003, "agent3@ebms.com", "James Wilson", Role::DeliveryAgent, "agent123"),
];
