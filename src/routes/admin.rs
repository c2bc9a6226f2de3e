use axum::http::Method;

use crate::{
    descriptor::EndpointDescriptor,
    roles::{Role, entity},
};

/// Admin Endpoint Catalog
///
/// Endpoints served exclusively to the 'admin' role: the system overview,
/// user management and the analytics panels of the admin dashboard.
///
/// Admin also appears on shared descriptors declared by the other catalogs
/// (product browsing, active orders, order details).
pub fn admin_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        // GET /api/admin/stats
        // Headline counters: users per role, products, orders.
        EndpointDescriptor::new("admin.stats", Method::GET, "/api/admin/stats")
            .roles([Role::Admin])
            .entities([
                entity::ADMIN,
                entity::SUPPLIER,
                entity::CUSTOMER,
                entity::DELIVERY_AGENT,
                entity::PRODUCT,
                entity::ORDERS,
            ]),
        // GET /api/admin/users
        EndpointDescriptor::new("admin.users", Method::GET, "/api/admin/users")
            .roles([Role::Admin])
            .entities([
                entity::ADMIN,
                entity::SUPPLIER,
                entity::CUSTOMER,
                entity::DELIVERY_AGENT,
            ]),
        // GET /api/admin/orders
        EndpointDescriptor::new("admin.orders", Method::GET, "/api/admin/orders")
            .roles([Role::Admin])
            .entities([entity::ORDERS, entity::ORDER_PRODUCT]),
        // GET /api/admin/products
        // Product performance monitoring, ratings included.
        EndpointDescriptor::new("admin.products", Method::GET, "/api/admin/products")
            .roles([Role::Admin])
            .entities([entity::PRODUCT, entity::PRODUCT_REVIEW]),
        // GET /api/admin/analytics/revenue
        EndpointDescriptor::new("admin.revenue", Method::GET, "/api/admin/analytics/revenue")
            .roles([Role::Admin])
            .entities([entity::ORDERS, entity::ORDER_PRODUCT, entity::PRODUCT]),
        // GET /api/admin/analytics/geography
        EndpointDescriptor::new(
            "admin.geography",
            Method::GET,
            "/api/admin/analytics/geography",
        )
        .roles([Role::Admin])
        .entities([entity::ORDERS, entity::ADDRESS]),
    ]
}
