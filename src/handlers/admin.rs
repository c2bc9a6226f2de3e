//! Admin dashboard: system overview, user management, order and revenue analytics.

use super::{HandlerContext, HandlerOutput, HandlerRegistry};
use crate::roles::Role;

pub fn register(registry: &mut HandlerRegistry) {
    registry
        .register(Role::Admin, "auth.me", super::me)
        .register(Role::Admin, "admin.stats", stats)
        .register(Role::Admin, "admin.users", users)
        .register(Role::Admin, "admin.orders", orders)
        .register(Role::Admin, "admin.products", products)
        .register(Role::Admin, "admin.revenue", revenue)
        .register(Role::Admin, "admin.geography", geography)
        .register(Role::Admin, "products.list", products)
        .register(Role::Admin, "products.detail", product_detail)
        .register(Role::Admin, "orders.active", active_orders)
        .register(Role::Admin, "orders.detail", order_detail);
}

fn stats(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("system overview counters")
}

fn users(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("customers, suppliers and delivery agents")
}

fn orders(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("all orders with line items")
}

fn products(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product performance across suppliers")
}

fn product_detail(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product with its reviews")
}

fn revenue(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("monthly revenue and order volume")
}

fn geography(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("order volume by delivery region")
}

fn active_orders(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("orders not yet delivered")
}

fn order_detail(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("order with line items")
}
