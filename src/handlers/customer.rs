//! Customer dashboard: browsing, cart, checkout, wallet, addresses and reviews.

use super::{HandlerContext, HandlerOutput, HandlerRegistry};
use crate::roles::Role;

pub fn register(registry: &mut HandlerRegistry) {
    registry
        .register(Role::Customer, "auth.me", super::me)
        .register(Role::Customer, "products.list", browse)
        .register(Role::Customer, "products.detail", product_detail)
        .register(Role::Customer, "products.review", review_product)
        .register(Role::Customer, "customer.cart", cart)
        .register(Role::Customer, "customer.cart_add", add_to_cart)
        .register(Role::Customer, "customer.cart_remove", remove_from_cart)
        .register(Role::Customer, "customer.checkout", checkout)
        .register(Role::Customer, "customer.orders", order_history)
        .register(Role::Customer, "orders.detail", order_detail)
        .register(Role::Customer, "orders.agent_review", review_agent)
        .register(Role::Customer, "customer.wallet", wallet)
        .register(Role::Customer, "customer.wallet_topup", top_up)
        .register(Role::Customer, "customer.addresses", addresses)
        .register(Role::Customer, "customer.address_add", add_address);
}

fn browse(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("products in stock")
}

fn product_detail(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product with its reviews")
}

fn review_product(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product review recorded")
}

fn cart(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("cart contents")
}

fn add_to_cart(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("item added to cart")
}

fn remove_from_cart(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("item removed from cart")
}

fn checkout(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("order placed and paid from wallet")
}

fn order_history(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("order history")
}

fn order_detail(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("order tracking")
}

fn review_agent(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("delivery agent review recorded")
}

fn wallet(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("wallet balance")
}

fn top_up(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("wallet topped up")
}

fn addresses(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("saved addresses")
}

fn add_address(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("address saved")
}
