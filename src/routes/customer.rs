use axum::http::Method;

use crate::{
    descriptor::EndpointDescriptor,
    roles::{Role, entity},
};

/// Customer Endpoint Catalog
///
/// Shopping flow of the customer dashboard: cart, checkout, order history,
/// wallet, addresses and reviews.
pub fn customer_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        // POST /api/products/{id}/reviews
        EndpointDescriptor::new("products.review", Method::POST, "/api/products/:id/reviews")
            .roles([Role::Customer])
            .entities([entity::PRODUCT_REVIEW]),
        // --- Cart ---
        EndpointDescriptor::new("customer.cart", Method::GET, "/api/customer/cart")
            .roles([Role::Customer])
            .entities([entity::CART, entity::PRODUCT]),
        EndpointDescriptor::new("customer.cart_add", Method::POST, "/api/customer/cart")
            .roles([Role::Customer])
            .entities([entity::CART]),
        EndpointDescriptor::new(
            "customer.cart_remove",
            Method::DELETE,
            "/api/customer/cart/:product_id",
        )
        .roles([Role::Customer])
        .entities([entity::CART]),
        // --- Orders ---
        // POST /api/customer/orders
        // Checkout: converts the cart into an order paid from the wallet.
        EndpointDescriptor::new("customer.checkout", Method::POST, "/api/customer/orders")
            .roles([Role::Customer])
            .entities([
                entity::ORDERS,
                entity::ORDER_PRODUCT,
                entity::CART,
                entity::WALLET,
            ]),
        EndpointDescriptor::new("customer.orders", Method::GET, "/api/customer/orders")
            .roles([Role::Customer])
            .entities([entity::ORDERS]),
        // GET /api/orders/active
        // Registered before `/api/orders/:id`; exact segments win regardless,
        // the order only matters for equally specific patterns.
        EndpointDescriptor::new("orders.active", Method::GET, "/api/orders/active")
            .roles([Role::Admin, Role::DeliveryAgent])
            .entities([entity::ORDERS]),
        // GET /api/orders/{id}
        // Order tracking, shared by the customer, the assigned agent and admin.
        EndpointDescriptor::new("orders.detail", Method::GET, "/api/orders/:id")
            .roles([Role::Admin, Role::Customer, Role::DeliveryAgent])
            .entities([entity::ORDERS, entity::ORDER_PRODUCT]),
        EndpointDescriptor::new(
            "orders.agent_review",
            Method::POST,
            "/api/orders/:id/agent-review",
        )
        .roles([Role::Customer])
        .entities([entity::DA_REVIEW]),
        // --- Wallet & addresses ---
        EndpointDescriptor::new("customer.wallet", Method::GET, "/api/customer/wallet")
            .roles([Role::Customer])
            .entities([entity::WALLET]),
        EndpointDescriptor::new(
            "customer.wallet_topup",
            Method::POST,
            "/api/customer/wallet/topup",
        )
        .roles([Role::Customer])
        .entities([entity::WALLET]),
        EndpointDescriptor::new("customer.addresses", Method::GET, "/api/customer/addresses")
            .roles([Role::Customer])
            .entities([entity::ADDRESS]),
        EndpointDescriptor::new(
            "customer.address_add",
            Method::POST,
            "/api/customer/addresses",
        )
        .roles([Role::Customer])
        .entities([entity::ADDRESS]),
    ]
}
