use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use ebms_gateway::{
    AppConfig, AppState, DescriptorTable, InMemoryIdentityStore, Role, create_router,
    identity::Identity,
    models::{ErrorBody, HealthStatus, LoginResponse},
    routes,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;
use uuid::Uuid;

// --- Test App ---

const CUSTOMER_ID: Uuid = Uuid::from_u128(0x3001);
const SUPPLIER_ID: Uuid = Uuid::from_u128(0x2001);

fn test_state() -> AppState {
    let mut store = InMemoryIdentityStore::new();
    store.insert(
        Identity::new(
            CUSTOMER_ID,
            "customer1@ebms.com",
            "John Smith",
            Role::Customer,
            "customer123",
        )
        .unwrap(),
    );
    store.insert(
        Identity::new(
            SUPPLIER_ID,
            "supplier1@ebms.com",
            "TechCorp Electronics",
            Role::Supplier,
            "supplier123",
        )
        .unwrap(),
    );

    let table = DescriptorTable::new(routes::ebms_catalog()).unwrap();
    AppState::new(AppConfig::default(), table, Arc::new(store)).unwrap()
}

fn test_router() -> Router {
    create_router(test_state())
}

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app() -> TestApp {
    let router = test_router();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn login_request(email: &str, password: &str, role: &str) -> Request<Body> {
    Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password, "role": role }).to_string(),
        ))
        .unwrap()
}

fn get_with_token(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn login_token(router: Router, email: &str, password: &str, role: &str) -> String {
    let (status, body) = send(router, login_request(email, password, role)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let login: LoginResponse = serde_json::from_value(body).unwrap();
    login.token
}

fn error_kind(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}

// --- Public routes ---

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());

    let health: HealthStatus = response.json().await.unwrap();
    assert_eq!(health.status, "OK");
}

#[tokio::test]
async fn test_login_issues_token_and_profile() {
    let (status, body) = send(
        test_router(),
        login_request("Customer1@EBMS.com", "customer123", "customer"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let login: LoginResponse = serde_json::from_value(body).unwrap();
    assert_eq!(login.token_type, "Bearer");
    assert_eq!(login.profile.id, CUSTOMER_ID);
    assert_eq!(login.profile.role, Role::Customer);
    assert_eq!(login.profile.email, "customer1@ebms.com");

    let state = test_state();
    let credential = state.dispatcher.verifier().verify(&login.token).unwrap();
    assert_eq!(credential.identity_id, CUSTOMER_ID);
    assert_eq!(credential.role, Role::Customer);
    // The reported expiry is the one signed into the token.
    assert_eq!(credential.expires_at, login.expires_at);
}

#[tokio::test]
async fn test_login_with_unknown_role_is_bad_request() {
    let (status, body) = send(
        test_router(),
        login_request("customer1@ebms.com", "customer123", "courier"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&body), "unknown_role");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let cases = [
        // Wrong password.
        ("customer1@ebms.com", "nope", "customer"),
        // Unknown account.
        ("ghost@ebms.com", "customer123", "customer"),
        // Right account, wrong role.
        ("customer1@ebms.com", "customer123", "supplier"),
    ];

    for (email, password, role) in cases {
        let (status, body) = send(test_router(), login_request(email, password, role)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{email} as {role}");

        let error: ErrorBody = serde_json::from_value(body).unwrap();
        assert!(!error.success);
        assert_eq!(error.error, "invalid_credentials");
        assert_eq!(error.message, "Invalid email or password");
    }
}

#[tokio::test]
async fn test_malformed_login_body_uses_error_envelope() {
    let requests = [
        // Not JSON at all.
        Request::post("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("email=customer1"))
            .unwrap(),
        // Missing the password field.
        Request::post("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": "customer1@ebms.com", "role": "customer" }).to_string(),
            ))
            .unwrap(),
        // No content type.
        Request::post("/api/auth/login")
            .body(Body::from("{}"))
            .unwrap(),
    ];

    for request in requests {
        let (status, body) = send(test_router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorBody = serde_json::from_value(body).unwrap();
        assert!(!error.success);
        assert_eq!(error.error, "malformed_body");
        assert_eq!(error.message, "Invalid request body");
    }
}

// --- Dispatched routes ---

#[tokio::test]
async fn test_unknown_route_is_not_found_even_without_token() {
    let (status, body) = send(test_router(), get_with_token("/api/nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_kind(&body), "route_not_found");
}

#[tokio::test]
async fn test_catalogued_route_without_token_is_unauthenticated() {
    let (status, body) = send(test_router(), get_with_token("/api/customer/cart", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_kind(&body), "unauthenticated");

    let (status, _) = send(
        test_router(),
        get_with_token("/api/customer/cart", Some("not-a-token")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_on_admin_route_is_forbidden() {
    let router = test_router();
    let token = login_token(router.clone(), "customer1@ebms.com", "customer123", "customer").await;

    let (status, body) = send(router, get_with_token("/api/admin/stats", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_kind(&body), "forbidden");
}

#[tokio::test]
async fn test_login_then_dispatch_to_role_handler() {
    let router = test_router();
    let token = login_token(router.clone(), "supplier1@ebms.com", "supplier123", "supplier").await;

    let (status, body) = send(router.clone(), get_with_token("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["operation"], "auth.me");
    assert_eq!(body["role"], "supplier");
    assert_eq!(body["identity"], SUPPLIER_ID.to_string());

    let (status, body) = send(router, get_with_token("/api/products/55", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["operation"], "products.detail");
    assert_eq!(body["params"]["id"], "55");
}

#[tokio::test]
async fn test_dispatch_over_http() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/login", app.address))
        .json(&json!({
            "email": "customer1@ebms.com",
            "password": "customer123",
            "role": "customer"
        }))
        .send()
        .await
        .expect("login fail");
    assert_eq!(response.status(), 200);
    let login: LoginResponse = response.json().await.unwrap();

    let response = client
        .get(format!("{}/api/customer/wallet", app.address))
        .bearer_auth(&login.token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["operation"], "customer.wallet");
}
