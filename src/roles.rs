use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Entity names as they appear in the EBMS schema.
pub mod entity {
    pub const ADMIN: &str = "admin";
    pub const SUPPLIER: &str = "supplier";
    pub const CUSTOMER: &str = "customer";
    pub const DELIVERY_AGENT: &str = "delivery_agent";
    pub const PRODUCT: &str = "product";
    pub const ORDERS: &str = "orders";
    pub const CART: &str = "cart";
    pub const ORDER_PRODUCT: &str = "order_product";
    pub const PRODUCT_REVIEW: &str = "product_review";
    pub const DA_REVIEW: &str = "da_review";
    pub const ADDRESS: &str = "address";
    pub const PHONE_NUMBER: &str = "phone_number";
    pub const WALLET: &str = "wallet";

    pub const ALL: &[&str] = &[
        ADMIN,
        SUPPLIER,
        CUSTOMER,
        DELIVERY_AGENT,
        PRODUCT,
        ORDERS,
        CART,
        ORDER_PRODUCT,
        PRODUCT_REVIEW,
        DA_REVIEW,
        ADDRESS,
        PHONE_NUMBER,
        WALLET,
    ];
}

const SUPPLIER_ENTITIES: &[&str] = &[
    entity::SUPPLIER,
    entity::PRODUCT,
    entity::ORDERS,
    entity::ORDER_PRODUCT,
    entity::PRODUCT_REVIEW,
    entity::ADDRESS,
    entity::PHONE_NUMBER,
];

const CUSTOMER_ENTITIES: &[&str] = &[
    entity::CUSTOMER,
    entity::PRODUCT,
    entity::CART,
    entity::ORDERS,
    entity::ORDER_PRODUCT,
    entity::WALLET,
    entity::ADDRESS,
    entity::PHONE_NUMBER,
    entity::PRODUCT_REVIEW,
    entity::DA_REVIEW,
];

const DELIVERY_AGENT_ENTITIES: &[&str] = &[
    entity::DELIVERY_AGENT,
    entity::ORDERS,
    entity::ORDER_PRODUCT,
    entity::DA_REVIEW,
    entity::ADDRESS,
    entity::PHONE_NUMBER,
];

/// Role
///
/// The closed set of EBMS actors. A role is fixed for the lifetime of an
/// identity; there is no promotion or demotion in this model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Admin,
    Supplier,
    Customer,
    DeliveryAgent,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Supplier,
        Role::Customer,
        Role::DeliveryAgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supplier => "supplier",
            Role::Customer => "customer",
            Role::DeliveryAgent => "delivery_agent",
        }
    }

    /// Entities this role may touch. Used to audit descriptor declarations at
    /// startup; enforcement happens per descriptor, not per entity.
    pub fn entities(self) -> &'static [&'static str] {
        match self {
            Role::Admin => entity::ALL,
            Role::Supplier => SUPPLIER_ENTITIES,
            Role::Customer => CUSTOMER_ENTITIES,
            Role::DeliveryAgent => DELIVERY_AGENT_ENTITIES,
        }
    }

    pub fn may_access(self, entity: &str) -> bool {
        self.entities().contains(&entity)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| ApiError::UnknownRole(value.to_string()))
    }
}

/// True iff `value` names one of the four roles. Matching is exact and
/// case-sensitive.
pub fn is_valid_role(value: &str) -> bool {
    value.parse::<Role>().is_ok()
}

/// Entity names accessible to the role named `role`.
pub fn entities_for(role: &str) -> Result<BTreeSet<&'static str>, ApiError> {
    let role: Role = role.parse()?;
    Ok(role.entities().iter().copied().collect())
}
