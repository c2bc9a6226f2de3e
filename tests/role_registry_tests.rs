use ebms_gateway::{
    ApiError, Role, entities_for, is_valid_role,
    roles::entity,
};

#[test]
fn test_all_four_roles_are_valid() {
    for name in ["admin", "supplier", "customer", "delivery_agent"] {
        assert!(is_valid_role(name), "{name} should be a valid role");
    }
}

#[test]
fn test_other_strings_are_not_roles() {
    for name in [
        "",
        "Admin",
        "ADMIN",
        "delivery-agent",
        "deliveryAgent",
        "courier",
        " admin",
        "student",
    ] {
        assert!(!is_valid_role(name), "{name:?} should not be a valid role");
    }
}

#[test]
fn test_role_names_round_trip_through_from_str_and_serde() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        assert_eq!(role.to_string(), role.as_str());
        assert_eq!(
            serde_json::to_string(&role).unwrap(),
            format!("\"{}\"", role.as_str())
        );
    }
}

#[test]
fn test_entities_for_unknown_role_fails() {
    assert_eq!(
        entities_for("courier"),
        Err(ApiError::UnknownRole("courier".to_string()))
    );
}

#[test]
fn test_admin_may_access_every_entity() {
    let admin = entities_for("admin").unwrap();
    assert_eq!(admin.len(), entity::ALL.len());
    for name in entity::ALL {
        assert!(admin.contains(name));
    }
}

#[test]
fn test_role_entity_scoping() {
    let supplier = entities_for("supplier").unwrap();
    assert!(supplier.contains(entity::PRODUCT));
    assert!(!supplier.contains(entity::WALLET));
    assert!(!supplier.contains(entity::CART));

    let customer = entities_for("customer").unwrap();
    assert!(customer.contains(entity::CART));
    assert!(customer.contains(entity::WALLET));
    assert!(!customer.contains(entity::ADMIN));

    let agent = entities_for("delivery_agent").unwrap();
    assert!(agent.contains(entity::DA_REVIEW));
    assert!(!agent.contains(entity::PRODUCT));
}

#[test]
fn test_every_role_may_access_its_own_table() {
    assert!(Role::Admin.may_access(entity::ADMIN));
    assert!(Role::Supplier.may_access(entity::SUPPLIER));
    assert!(Role::Customer.may_access(entity::CUSTOMER));
    assert!(Role::DeliveryAgent.may_access(entity::DELIVERY_AGENT));
}
