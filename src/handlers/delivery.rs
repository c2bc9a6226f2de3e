//! Delivery agent dashboard: assignments, status updates and performance.

use super::{HandlerContext, HandlerOutput, HandlerRegistry};
use crate::roles::Role;

pub fn register(registry: &mut HandlerRegistry) {
    registry
        .register(Role::DeliveryAgent, "auth.me", super::me)
        .register(Role::DeliveryAgent, "delivery.assignments", assignments)
        .register(Role::DeliveryAgent, "delivery.status", update_status)
        .register(Role::DeliveryAgent, "delivery.performance", performance)
        .register(Role::DeliveryAgent, "orders.active", active_orders)
        .register(Role::DeliveryAgent, "orders.detail", order_detail);
}

fn assignments(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("deliveries assigned to this agent")
}

fn update_status(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("delivery status updated")
}

fn performance(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("ratings and completed deliveries")
}

fn active_orders(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("orders awaiting delivery")
}

fn order_detail(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("delivery details for the order")
}
