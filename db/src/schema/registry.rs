//! Validated, read-only collection of entity schemas.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AssociationKind, EntitySchema, SchemaDescriptor, SchemaError};

/// Table and column names must be plain SQL identifiers.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// On-disk shape of a schema document.
///
/// ```json
/// {
///   "entities": [
///     {
///       "name": "User",
///       "table": "users",
///       "primary_key": "id",
///       "attributes": [{"name": "id", "type": "integer"}],
///       "associations": [{"kind": "has_many", "entity": "Order", "foreign_key": "user_id"}]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub entities: Vec<EntitySchema>,
}

/// A validated set of entities.
///
/// Built once at startup and never mutated afterwards, so a single registry
/// can be shared by any number of concurrent searches.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entities: Vec<EntitySchema>,
    by_name: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Validate the given entities and freeze them into a registry.
    ///
    /// Association tables left blank are filled from the related entity.
    pub fn new(entities: Vec<EntitySchema>) -> Result<Self, SchemaError> {
        let mut by_name = HashMap::with_capacity(entities.len());
        for (idx, entity) in entities.iter().enumerate() {
            if by_name.insert(entity.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateEntity {
                    entity: entity.name.clone(),
                });
            }
        }

        for entity in &entities {
            validate_entity(entity)?;
        }

        let tables: Vec<String> = entities.iter().map(|e| e.table_name.clone()).collect();
        let mut entities = entities;
        for entity in &mut entities {
            for assoc in &mut entity.associations {
                let Some(&related_idx) = by_name.get(&assoc.related_entity) else {
                    return Err(SchemaError::UnknownRelatedEntity {
                        entity: entity.name.clone(),
                        kind: assoc.kind,
                        related: assoc.related_entity.clone(),
                    });
                };
                let actual = &tables[related_idx];
                if assoc.related_table.is_empty() {
                    assoc.related_table = actual.clone();
                } else if &assoc.related_table != actual {
                    return Err(SchemaError::RelatedTableMismatch {
                        entity: entity.name.clone(),
                        related: assoc.related_entity.clone(),
                        declared: assoc.related_table.clone(),
                        actual: actual.clone(),
                    });
                }
            }
        }

        for entity in &entities {
            for assoc in &entity.associations {
                let related = &entities[by_name[&assoc.related_entity]];
                let owner = match assoc.kind {
                    AssociationKind::BelongsTo => entity,
                    AssociationKind::HasMany => related,
                };
                if owner.find_attribute(&assoc.foreign_key).is_none() {
                    return Err(SchemaError::MissingForeignKey {
                        entity: entity.name.clone(),
                        kind: assoc.kind,
                        related: assoc.related_entity.clone(),
                        foreign_key: assoc.foreign_key.clone(),
                        owner: owner.name.clone(),
                    });
                }
            }
        }

        tracing::info!(entities = entities.len(), "schema registry loaded");
        Ok(Self { entities, by_name })
    }

    /// Parse and validate a JSON schema document.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse {
                message: e.to_string(),
            })?;
        Self::new(document.entities)
    }

    /// Read, parse and validate a JSON schema document from disk.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Entity names in declaration order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    pub fn entities(&self) -> &[EntitySchema] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl SchemaDescriptor for SchemaRegistry {
    fn entity(&self, name: &str) -> Option<&EntitySchema> {
        self.by_name.get(name).map(|&idx| &self.entities[idx])
    }
}

fn validate_entity(entity: &EntitySchema) -> Result<(), SchemaError> {
    let check = |identifier: &str| {
        if IDENTIFIER_REGEX.is_match(identifier) {
            Ok(())
        } else {
            Err(SchemaError::InvalidIdentifier {
                entity: entity.name.clone(),
                identifier: identifier.to_string(),
            })
        }
    };

    check(&entity.table_name)?;

    let mut seen = HashSet::with_capacity(entity.attributes.len());
    for attr in &entity.attributes {
        check(&attr.name)?;
        if !seen.insert(attr.name.as_str()) {
            return Err(SchemaError::DuplicateAttribute {
                entity: entity.name.clone(),
                attribute: attr.name.clone(),
            });
        }
    }

    if !seen.contains(entity.primary_key.as_str()) {
        return Err(SchemaError::MissingPrimaryKey {
            entity: entity.name.clone(),
            primary_key: entity.primary_key.clone(),
        });
    }

    for assoc in &entity.associations {
        check(&assoc.foreign_key)?;
        if !assoc.related_table.is_empty() {
            check(&assoc.related_table)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeKind;
    use rstest::{fixture, rstest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn user() -> EntitySchema {
        EntitySchema::new("User", "users", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("name", AttributeKind::String)
            .attribute("city_id", AttributeKind::Integer)
            .belongs_to("City", "city_id")
            .has_many("Order", "user_id")
    }

    fn city() -> EntitySchema {
        EntitySchema::new("City", "cities", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("title", AttributeKind::String)
    }

    fn order() -> EntitySchema {
        EntitySchema::new("Order", "orders", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("user_id", AttributeKind::Integer)
            .attribute("total", AttributeKind::Float)
    }

    #[fixture]
    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(vec![user(), city(), order()]).unwrap()
    }

    #[rstest]
    fn test_registry_lookup(registry: SchemaRegistry) {
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.table_name("City"), Some("cities"));
        assert_eq!(registry.primary_key("Order"), Some("id"));
        assert_eq!(registry.attributes("User").unwrap().len(), 3);
        assert!(registry.entity("Nope").is_none());
        assert_eq!(
            registry.entity_names().collect::<Vec<_>>(),
            vec!["User", "City", "Order"]
        );
    }

    #[rstest]
    fn test_registry_fills_related_tables(registry: SchemaRegistry) {
        let belongs = registry.associations("User", AssociationKind::BelongsTo);
        assert_eq!(belongs.len(), 1);
        assert_eq!(belongs[0].related_table, "cities");

        let has_many = registry.associations("User", AssociationKind::HasMany);
        assert_eq!(has_many[0].related_table, "orders");
        assert_eq!(has_many[0].foreign_key, "user_id");
    }

    #[rstest]
    fn test_associations_of_unknown_entity_is_empty(registry: SchemaRegistry) {
        assert!(registry.associations("Ghost", AssociationKind::HasMany).is_empty());
    }

    #[rstest]
    fn test_unknown_related_entity_is_fatal() {
        let err = SchemaRegistry::new(vec![user(), city()]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownRelatedEntity { ref related, .. } if related == "Order"
        ));
    }

    #[rstest]
    fn test_duplicate_entity() {
        let err = SchemaRegistry::new(vec![city(), city()]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateEntity { .. }));
    }

    #[rstest]
    fn test_duplicate_attribute() {
        let dup = city().attribute("title", AttributeKind::Text);
        let err = SchemaRegistry::new(vec![dup]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateAttribute { ref attribute, .. } if attribute == "title"
        ));
    }

    #[rstest]
    fn test_missing_primary_key() {
        let entity = EntitySchema::new("Tag", "tags", "id").attribute("label", AttributeKind::String);
        let err = SchemaRegistry::new(vec![entity]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingPrimaryKey { .. }));
    }

    #[rstest]
    fn test_missing_belongs_to_foreign_key() {
        let entity = EntitySchema::new("Shop", "shops", "id")
            .attribute("id", AttributeKind::Integer)
            .belongs_to("City", "city_id");
        let err = SchemaRegistry::new(vec![entity, city()]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingForeignKey { ref owner, .. } if owner == "Shop"
        ));
    }

    #[rstest]
    fn test_missing_has_many_foreign_key() {
        let entity = EntitySchema::new("Country", "countries", "id")
            .attribute("id", AttributeKind::Integer)
            .has_many("City", "country_id");
        let err = SchemaRegistry::new(vec![entity, city()]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingForeignKey { ref owner, .. } if owner == "City"
        ));
    }

    #[rstest]
    #[case("users; DROP TABLE users")]
    #[case("1users")]
    #[case("users.name")]
    #[case("")]
    fn test_invalid_table_identifier(#[case] table: &str) {
        let entity = EntitySchema::new("User", table, "id").attribute("id", AttributeKind::Integer);
        let err = SchemaRegistry::new(vec![entity]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifier { .. }));
    }

    #[rstest]
    fn test_invalid_column_identifier() {
        let entity = EntitySchema::new("User", "users", "id")
            .attribute("id", AttributeKind::Integer)
            .attribute("name) OR 1=1 --", AttributeKind::String);
        let err = SchemaRegistry::new(vec![entity]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifier { .. }));
    }

    #[rstest]
    fn test_related_table_mismatch() {
        let json = r#"
        {
            "entities": [
                {
                    "name": "Order", "table": "orders", "primary_key": "id",
                    "attributes": [{"name": "id", "type": "integer"}, {"name": "user_id", "type": "integer"}],
                    "associations": [{"kind": "belongs_to", "entity": "User", "table": "people", "foreign_key": "user_id"}]
                },
                {
                    "name": "User", "table": "users", "primary_key": "id",
                    "attributes": [{"name": "id", "type": "integer"}]
                }
            ]
        }
        "#;
        let err = SchemaRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, SchemaError::RelatedTableMismatch { .. }));
    }

    #[rstest]
    fn test_from_json_str_invalid_json() {
        let err = SchemaRegistry::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[rstest]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        let document = SchemaDocument {
            entities: vec![user(), city(), order()],
        };
        write!(file, "{}", serde_json::to_string(&document).unwrap()).unwrap();

        let registry = SchemaRegistry::from_path(file.path()).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.associations("User", AssociationKind::BelongsTo)[0].related_table,
            "cities"
        );
    }

    #[rstest]
    fn test_from_path_missing_file() {
        let err = SchemaRegistry::from_path(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
