//! Which attributes of an entity can be searched on.

use crate::schema::{Attribute, EntitySchema};

/// Whether `name` may be filtered on: it is neither the primary key nor a
/// foreign key used by any association.
pub fn is_searchable(schema: &EntitySchema, name: &str) -> bool {
    name != schema.primary_key && !schema.foreign_keys().any(|fk| fk == name)
}

/// All attributes minus the primary key minus every association foreign key,
/// in declaration order.
pub fn searchable_attributes(schema: &EntitySchema) -> Vec<&Attribute> {
    schema
        .attributes
        .iter()
        .filter(|attr| is_searchable(schema, &attr.name))
        .collect()
}
