//! Handler Groups
//!
//! Each submodule holds the operations of one dashboard. The operations are
//! stubs that acknowledge the call; their entity declarations live on the
//! matching endpoint descriptors in `routes`.

use std::collections::HashMap;

use serde_json::{Value, json};

use crate::{
    auth::Credential,
    descriptor::{DescriptorTable, EndpointDescriptor, PathParams},
    error::ApiError,
    roles::Role,
};

pub mod admin;
pub mod customer;
pub mod delivery;
pub mod supplier;

/// Opaque handler result, returned to the client unchanged.
pub type HandlerOutput = Value;

pub type HandlerFn = fn(&HandlerContext<'_>) -> HandlerOutput;

/// Everything a handler may know about the request it serves.
#[derive(Debug)]
pub struct HandlerContext<'a> {
    pub descriptor: &'a EndpointDescriptor,
    pub credential: &'a Credential,
    pub params: &'a PathParams,
}

impl HandlerContext<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Standard acknowledgement produced by the stub operations.
    pub fn acknowledge(&self, summary: &str) -> HandlerOutput {
        json!({
            "success": true,
            "operation": self.descriptor.id,
            "summary": summary,
            "role": self.credential.role,
            "identity": self.credential.identity_id,
            "params": self.params,
            "entities": self.descriptor.entities,
        })
    }
}

/// HandlerRegistry
///
/// Maps (role, descriptor id) to the operation serving that role. A descriptor
/// shared by several roles has one entry per role, so each dashboard keeps its
/// own implementation.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(Role, String), HandlerFn>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every EBMS handler group.
    pub fn ebms() -> Self {
        let mut registry = Self::new();
        admin::register(&mut registry);
        supplier::register(&mut registry);
        customer::register(&mut registry);
        delivery::register(&mut registry);
        registry
    }

    pub fn register(&mut self, role: Role, descriptor_id: &str, handler: HandlerFn) -> &mut Self {
        if self
            .handlers
            .insert((role, descriptor_id.to_string()), handler)
            .is_some()
        {
            tracing::warn!(%role, descriptor_id, "handler registered twice, keeping the last one");
        }
        self
    }

    pub fn get(&self, role: Role, descriptor_id: &str) -> Option<HandlerFn> {
        self.handlers
            .get(&(role, descriptor_id.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Startup check: every allowed role of every descriptor needs a handler.
    pub fn ensure_covers(&self, table: &DescriptorTable) -> Result<(), ApiError> {
        for descriptor in table.descriptors() {
            if let Some(role) = descriptor
                .allowed_roles
                .iter()
                .find(|role| self.get(**role, &descriptor.id).is_none())
            {
                return Err(ApiError::inconsistent(
                    &descriptor.id,
                    format!("no handler registered for role `{role}`"),
                ));
            }
        }
        Ok(())
    }
}

/// Shared by every role: the caller's own profile.
pub(crate) fn me(ctx: &HandlerContext<'_>) -> HandlerOutput {
    json!({
        "success": true,
        "operation": ctx.descriptor.id,
        "identity": ctx.credential.identity_id,
        "role": ctx.credential.role,
        "expires_at": ctx.credential.expires_at,
    })
}
