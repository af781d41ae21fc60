//! Shared schema fixtures for tests.

use crate::schema::{AttributeKind, EntitySchema, SchemaRegistry};

/// A small shop schema:
///
/// - `User` (users) belongs to `City`, has many `Order`
/// - `City` (cities)
/// - `Order` (orders) belongs to `User`
/// - `Product` (products) belongs to `Supplier` twice (main and backup)
/// - `Supplier` (suppliers)
pub fn shop_entities() -> Vec<EntitySchema> {
    vec![
        EntitySchema::new("User", "users", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("name", AttributeKind::String)
            .attribute("age", AttributeKind::Integer)
            .attribute("active", AttributeKind::Boolean)
            .attribute("created_at", AttributeKind::Other)
            .attribute("city_id", AttributeKind::Integer)
            .belongs_to("City", "city_id")
            .has_many("Order", "user_id"),
        EntitySchema::new("City", "cities", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("title", AttributeKind::String),
        EntitySchema::new("Order", "orders", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("user_id", AttributeKind::Integer)
            .attribute("title", AttributeKind::Text)
            .attribute("total", AttributeKind::Float)
            .belongs_to("User", "user_id"),
        EntitySchema::new("Product", "products", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("name", AttributeKind::String)
            .attribute("price", AttributeKind::Float)
            .attribute("supplier_id", AttributeKind::Integer)
            .attribute("backup_supplier_id", AttributeKind::Integer)
            .belongs_to("Supplier", "supplier_id")
            .belongs_to("Supplier", "backup_supplier_id"),
        EntitySchema::new("Supplier", "suppliers", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("company", AttributeKind::String),
    ]
}

/// Validated registry over [`shop_entities`].
pub fn shop_registry() -> SchemaRegistry {
    SchemaRegistry::new(shop_entities()).expect("shop schema is valid")
}
