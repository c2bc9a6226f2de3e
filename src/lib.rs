use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderName, HeaderValue, Method, header},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Access-control core.
pub mod auth;
pub mod descriptor;
pub mod dispatcher;
pub mod handlers;
pub mod roles;

// Supporting services and schemas.
pub mod config;
pub mod error;
pub mod identity;
pub mod models;

// Public routes and the per-dashboard endpoint catalogs.
pub mod routes;

// --- Public Re-exports ---

pub use auth::{Credential, CredentialVerifier};
pub use config::AppConfig;
pub use descriptor::{DescriptorTable, EndpointDescriptor};
pub use dispatcher::{AccessDispatcher, DispatcherState};
pub use error::ApiError;
pub use handlers::HandlerRegistry;
pub use identity::{IdentityState, InMemoryIdentityStore};
pub use roles::{Role, entities_for, is_valid_role};

/// ApiDoc
///
/// OpenAPI document for the public routes and the shared schemas, served at
/// `/api-docs/openapi.json`. Dispatcher endpoints are described by the
/// descriptor table instead.
#[derive(OpenApi)]
#[openapi(
    paths(routes::public::health, routes::public::login),
    components(schemas(
        models::LoginRequest,
        models::LoginResponse,
        models::IdentityProfile,
        models::HealthStatus,
        models::ErrorBody,
        roles::Role,
    )),
    tags((name = "ebms", description = "E-Business Management System API"))
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Access Layer: descriptor table, handler registry and token verifier.
    pub dispatcher: DispatcherState,
    /// Identity Layer: the store consulted by the login route.
    pub identities: IdentityState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Assembles the state around `table`, wiring a verifier built from
    /// `config` and the EBMS handler groups.
    ///
    /// Fails with `InconsistentDescriptor` when the table and the handler
    /// groups disagree; the process must not serve traffic in that case.
    pub fn new(
        config: AppConfig,
        table: DescriptorTable,
        identities: IdentityState,
    ) -> Result<Self, ApiError> {
        let verifier = CredentialVerifier::from_config(&config);
        let dispatcher = AccessDispatcher::new(table, HandlerRegistry::ebms(), verifier)?;
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            identities,
            config,
        })
    }
}

// --- Axum FromRef Extractor Implementations ---

// These implementations let handlers pull just the component they need out of
// the shared AppState.

impl FromRef<AppState> for DispatcherState {
    fn from_ref(app_state: &AppState) -> DispatcherState {
        app_state.dispatcher.clone()
    }
}

impl FromRef<AppState> for IdentityState {
    fn from_ref(app_state: &AppState) -> IdentityState {
        app_state.identities.clone()
    }
}

impl FromRef<AppState> for CredentialVerifier {
    fn from_ref(app_state: &AppState) -> CredentialVerifier {
        app_state.dispatcher.verifier().clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure: docs and public routes are explicit, every
/// other request falls through to the access dispatcher.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    // Restricted to the dashboard origin named in FRONTEND_URL.
    let cors = cors_layer(&state.config.frontend_url);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Route Assembly
    let base_router = Router::new()
        // Swagger UI and the OpenAPI JSON for the public routes.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health and login, reachable without a credential.
        .merge(routes::public::public_routes())
        // Role-scoped endpoints: matched, authenticated and authorized by the dispatcher.
        .fallback(dispatcher::dispatch_request)
        // Injects the shared state into every handler.
        .with_state(state);

    // 3. Global Middleware Stack
    // ServiceBuilder layers run top to bottom on the way in.
    base_router
        .layer(
            ServiceBuilder::new()
                // Assigns a fresh UUID to each request lacking an x-request-id.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Opens the request span and logs status and latency on response.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Echoes the request id back in the response headers.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // CORS is outermost so preflight requests never reach the dispatcher.
        .layer(cors)
}

/// CORS for the dashboard frontend. Credentials are only allowed together
/// with an exact origin; an unparsable origin falls back to a permissive
/// policy without credentials.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(frontend_url, "FRONTEND_URL is not a valid origin, allowing any");
            CorsLayer::new()
                .allow_methods(Any)
                .allow_origin(Any)
                .allow_headers(Any)
        }
    }
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: every log line of one request carries its
/// method, uri and `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
