use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{Method, Uri},
};

use crate::{
    auth::{BearerToken, Credential, CredentialVerifier},
    descriptor::{DescriptorTable, EndpointDescriptor, RouteMatch},
    error::ApiError,
    handlers::{HandlerContext, HandlerOutput, HandlerRegistry},
    roles::Role,
};

/// One request as seen by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct DispatchRequest<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub bearer: Option<&'a str>,
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub descriptor_id: String,
    pub role: Role,
    pub output: HandlerOutput,
}

/// AccessDispatcher
///
/// Matches a request to its endpoint descriptor, authenticates the bearer,
/// authorizes the role and runs the handler registered for (role, descriptor).
///
/// The dispatcher holds no per-request state: the table, registry and keys
/// are fixed at construction and only read afterwards.
pub struct AccessDispatcher {
    table: Arc<DescriptorTable>,
    handlers: Arc<HandlerRegistry>,
    verifier: CredentialVerifier,
}

/// DispatcherState
///
/// The shared dispatcher held in the application state.
pub type DispatcherState = Arc<AccessDispatcher>;

impl AccessDispatcher {
    /// Fails with `InconsistentDescriptor` if some allowed role of some
    /// descriptor has no registered handler.
    pub fn new(
        table: DescriptorTable,
        handlers: HandlerRegistry,
        verifier: CredentialVerifier,
    ) -> Result<Self, ApiError> {
        handlers.ensure_covers(&table)?;
        tracing::debug!(
            endpoints = table.len(),
            handlers = handlers.len(),
            "access dispatcher ready"
        );
        Ok(Self {
            table: Arc::new(table),
            handlers: Arc::new(handlers),
            verifier,
        })
    }

    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    /// The most specific descriptor for the request, or `RouteNotFound`.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, ApiError> {
        self.table
            .lookup(method, path)
            .ok_or(ApiError::RouteNotFound)
    }

    /// Any verifier failure, or a missing token, is `Unauthenticated`.
    pub fn authenticate(&self, bearer: Option<&str>) -> Result<Credential, ApiError> {
        let token = bearer.ok_or(ApiError::Unauthenticated)?;
        self.verifier.verify(token).map_err(|reason| {
            tracing::debug!(kind = reason.kind(), "credential rejected");
            ApiError::Unauthenticated
        })
    }

    /// The credential's role must be among the descriptor's allowed roles.
    pub fn authorize(descriptor: &EndpointDescriptor, credential: &Credential) -> Result<(), ApiError> {
        if descriptor.allows(credential.role) {
            Ok(())
        } else {
            tracing::info!(
                descriptor = %descriptor.id,
                role = %credential.role,
                identity = %credential.identity_id,
                "role not allowed on endpoint"
            );
            Err(ApiError::Forbidden)
        }
    }

    /// Runs the full decision and, on success, the handler. The handler output
    /// is returned unchanged.
    pub fn dispatch(&self, request: &DispatchRequest<'_>) -> Result<Dispatched, ApiError> {
        let RouteMatch { descriptor, params } = self.resolve(request.method, request.path)?;
        let credential = self.authenticate(request.bearer)?;
        Self::authorize(descriptor, &credential)?;

        // Coverage was checked at construction, so a miss here means the
        // registry and table drifted apart.
        let handler = self
            .handlers
            .get(credential.role, &descriptor.id)
            .ok_or_else(|| {
                ApiError::inconsistent(
                    &descriptor.id,
                    format!("no handler registered for role `{}`", credential.role),
                )
            })?;

        tracing::debug!(
            descriptor = %descriptor.id,
            role = %credential.role,
            "dispatching request"
        );
        let output = handler(&HandlerContext {
            descriptor,
            credential: &credential,
            params: &params,
        });

        Ok(Dispatched {
            descriptor_id: descriptor.id.clone(),
            role: credential.role,
            output,
        })
    }
}

/// dispatch_request
///
/// Router fallback serving every catalogued endpoint. Requests that no public
/// route claimed land here and go through the access dispatcher.
pub async fn dispatch_request(
    State(dispatcher): State<DispatcherState>,
    method: Method,
    uri: Uri,
    BearerToken(bearer): BearerToken,
) -> Result<Json<HandlerOutput>, ApiError> {
    let dispatched = dispatcher.dispatch(&DispatchRequest {
        method: &method,
        path: uri.path(),
        bearer: bearer.as_deref(),
    })?;
    Ok(Json(dispatched.output))
}
