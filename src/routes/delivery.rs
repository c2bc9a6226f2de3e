use axum::http::Method;

use crate::{
    descriptor::EndpointDescriptor,
    roles::{Role, entity},
};

/// Delivery agent endpoints: assigned deliveries, status updates, performance.
pub fn delivery_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(
            "delivery.assignments",
            Method::GET,
            "/api/delivery/assignments",
        )
        .roles([Role::DeliveryAgent])
        .entities([entity::ORDERS, entity::ADDRESS]),
        // PATCH /api/delivery/orders/{id}/status
        EndpointDescriptor::new(
            "delivery.status",
            Method::PATCH,
            "/api/delivery/orders/:id/status",
        )
        .roles([Role::DeliveryAgent])
        .entities([entity::ORDERS]),
        EndpointDescriptor::new(
            "delivery.performance",
            Method::GET,
            "/api/delivery/performance",
        )
        .roles([Role::DeliveryAgent])
        .entities([entity::DA_REVIEW, entity::ORDERS]),
    ]
}
