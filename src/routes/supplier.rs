use axum::http::Method;

use crate::{
    descriptor::EndpointDescriptor,
    roles::{Role, entity},
};

/// Supplier Endpoint Catalog
///
/// Catalog and inventory management for the supplier dashboard, plus the
/// shared product browsing endpoints.
///
/// Ownership (a supplier only editing its own products) is the handler's
/// concern; the descriptor only scopes the role.
pub fn supplier_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        // GET /api/products
        // Marketplace listing shared by every role that browses products.
        EndpointDescriptor::new("products.list", Method::GET, "/api/products")
            .roles([Role::Admin, Role::Supplier, Role::Customer])
            .entities([entity::PRODUCT]),
        // GET /api/products/{id}
        EndpointDescriptor::new("products.detail", Method::GET, "/api/products/:id")
            .roles([Role::Admin, Role::Supplier, Role::Customer])
            .entities([entity::PRODUCT, entity::PRODUCT_REVIEW]),
        // --- Catalog management ---
        EndpointDescriptor::new("supplier.products", Method::GET, "/api/supplier/products")
            .roles([Role::Supplier])
            .entities([entity::PRODUCT]),
        EndpointDescriptor::new(
            "supplier.product_create",
            Method::POST,
            "/api/supplier/products",
        )
        .roles([Role::Supplier])
        .entities([entity::PRODUCT]),
        EndpointDescriptor::new(
            "supplier.product_update",
            Method::PUT,
            "/api/supplier/products/:id",
        )
        .roles([Role::Supplier])
        .entities([entity::PRODUCT]),
        EndpointDescriptor::new(
            "supplier.product_delete",
            Method::DELETE,
            "/api/supplier/products/:id",
        )
        .roles([Role::Supplier])
        .entities([entity::PRODUCT]),
        // PATCH /api/supplier/products/{id}/stock
        // Inventory adjustment; partial update, hence PATCH.
        EndpointDescriptor::new(
            "supplier.stock",
            Method::PATCH,
            "/api/supplier/products/:id/stock",
        )
        .roles([Role::Supplier])
        .entities([entity::PRODUCT]),
        // --- Fulfilment & analytics ---
        EndpointDescriptor::new("supplier.orders", Method::GET, "/api/supplier/orders")
            .roles([Role::Supplier])
            .entities([entity::ORDERS, entity::ORDER_PRODUCT]),
        EndpointDescriptor::new(
            "supplier.sales",
            Method::GET,
            "/api/supplier/analytics/sales",
        )
        .roles([Role::Supplier])
        .entities([entity::ORDERS, entity::ORDER_PRODUCT, entity::PRODUCT]),
        EndpointDescriptor::new("supplier.reviews", Method::GET, "/api/supplier/reviews")
            .roles([Role::Supplier])
            .entities([entity::PRODUCT_REVIEW]),
    ]
}
