//! Router Module Index
//!
//! Public routes are plain axum routes. Everything else is described by
//! endpoint descriptors, grouped by the dashboard that owns them, and served
//! through the access dispatcher.

use axum::http::Method;

use crate::{descriptor::EndpointDescriptor, roles::Role};

/// Routes accessible without a credential (health, login, API docs).
pub mod public;

/// Admin-only endpoints.
pub mod admin;

/// Supplier endpoints and the shared product browsing endpoints.
pub mod supplier;

/// Customer endpoints and the shared order endpoints.
pub mod customer;

/// Delivery agent endpoints.
pub mod delivery;

/// The built-in EBMS endpoint catalog, in registration order.
pub fn ebms_catalog() -> Vec<EndpointDescriptor> {
    let mut catalog = vec![
        // GET /api/auth/me
        // Profile of the bearer, available to every role. Touches no entity.
        EndpointDescriptor::new("auth.me", Method::GET, "/api/auth/me").roles(Role::ALL),
    ];
    catalog.extend(admin::admin_endpoints());
    catalog.extend(supplier::supplier_endpoints());
    catalog.extend(customer::customer_endpoints());
    catalog.extend(delivery::delivery_endpoints());
    catalog
}
