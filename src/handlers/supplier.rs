//! Supplier dashboard: catalog and inventory, fulfilment, sales and feedback.

use super::{HandlerContext, HandlerOutput, HandlerRegistry};
use crate::roles::Role;

pub fn register(registry: &mut HandlerRegistry) {
    registry
        .register(Role::Supplier, "auth.me", super::me)
        .register(Role::Supplier, "products.list", catalog)
        .register(Role::Supplier, "products.detail", product_detail)
        .register(Role::Supplier, "supplier.products", own_products)
        .register(Role::Supplier, "supplier.product_create", create_product)
        .register(Role::Supplier, "supplier.product_update", update_product)
        .register(Role::Supplier, "supplier.product_delete", delete_product)
        .register(Role::Supplier, "supplier.stock", adjust_stock)
        .register(Role::Supplier, "supplier.orders", orders)
        .register(Role::Supplier, "supplier.sales", sales)
        .register(Role::Supplier, "supplier.reviews", reviews);
}

fn catalog(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("marketplace catalog")
}

fn product_detail(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product with its reviews")
}

fn own_products(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("products listed by this supplier")
}

fn create_product(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product created")
}

fn update_product(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product updated")
}

fn delete_product(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("product removed from the catalog")
}

fn adjust_stock(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("stock level adjusted")
}

fn orders(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("orders containing this supplier's products")
}

fn sales(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("sales and revenue by product")
}

fn reviews(ctx: &HandlerContext<'_>) -> HandlerOutput {
    ctx.acknowledge("customer feedback on this supplier's products")
}
