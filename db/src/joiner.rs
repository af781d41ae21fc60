//! Joins from a root entity to its directly associated entities.
//!
//! Each association contributes one join clause plus the predicates built
//! from the related entity's searchable attributes, qualified by the join
//! alias. Associations are visited in declaration order and every join gets
//! its own alias, so no two predicates ever target the same column.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::classifier::searchable_attributes;
use crate::predicate::{Column, Predicate, build_predicate};
use crate::schema::{AssociationKind, EntitySchema, SchemaDescriptor, SchemaError};

/// SQL join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    LeftOuter,
    RightOuter,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
        }
    }
}

/// `<kind> <table> <alias> ON <left> = <right>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: String,
    pub alias: String,
    pub left: Column,
    pub right: Column,
}

/// Joins and predicates contributed by one kind of association.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinOutcome {
    pub joins: Vec<JoinClause>,
    pub predicates: Vec<Predicate>,
}

impl JoinOutcome {
    pub fn extend(&mut self, other: JoinOutcome) {
        self.joins.extend(other.joins);
        self.predicates.extend(other.predicates);
    }
}

/// Hands out unique table aliases within one query.
///
/// A table is aliased by its own name the first time it appears. Later
/// appearances (a self-association, or two associations to the same table)
/// get `<table>_2`, `<table>_3`, ...
#[derive(Debug, Clone)]
pub struct AliasAllocator {
    used: HashSet<String>,
}

impl AliasAllocator {
    /// Start with the root table already in scope.
    pub fn new(root_table: &str) -> Self {
        let mut used = HashSet::new();
        used.insert(root_table.to_string());
        Self { used }
    }

    pub fn allocate(&mut self, table: &str) -> String {
        let mut alias = table.to_string();
        let mut n = 2;
        while self.used.contains(&alias) {
            alias = format!("{}_{}", table, n);
            n += 1;
        }
        self.used.insert(alias.clone());
        alias
    }
}

/// Left-outer join every belongs-to association:
/// `root.<foreign_key> = related.<primary_key>`.
pub fn join_belongs_to(
    schema: &dyn SchemaDescriptor,
    root: &EntitySchema,
    params: &BTreeMap<String, String>,
    aliases: &mut AliasAllocator,
) -> Result<JoinOutcome, SchemaError> {
    join_associations(schema, root, AssociationKind::BelongsTo, params, aliases)
}

/// Right-outer join every has-many association:
/// `root.<primary_key> = related.<foreign_key>`.
pub fn join_has_many(
    schema: &dyn SchemaDescriptor,
    root: &EntitySchema,
    params: &BTreeMap<String, String>,
    aliases: &mut AliasAllocator,
) -> Result<JoinOutcome, SchemaError> {
    join_associations(schema, root, AssociationKind::HasMany, params, aliases)
}

fn join_associations(
    schema: &dyn SchemaDescriptor,
    root: &EntitySchema,
    kind: AssociationKind,
    params: &BTreeMap<String, String>,
    aliases: &mut AliasAllocator,
) -> Result<JoinOutcome, SchemaError> {
    let mut outcome = JoinOutcome::default();

    for assoc in schema.associations(&root.name, kind) {
        let related = schema.entity(&assoc.related_entity).ok_or_else(|| {
            SchemaError::UnknownRelatedEntity {
                entity: root.name.clone(),
                kind,
                related: assoc.related_entity.clone(),
            }
        })?;

        let alias = aliases.allocate(&related.table_name);
        let (join_kind, left, right) = match kind {
            AssociationKind::BelongsTo => (
                JoinKind::LeftOuter,
                Column::new(&root.table_name, &assoc.foreign_key),
                Column::new(&alias, &related.primary_key),
            ),
            AssociationKind::HasMany => (
                JoinKind::RightOuter,
                Column::new(&root.table_name, &root.primary_key),
                Column::new(&alias, &assoc.foreign_key),
            ),
        };

        outcome.predicates.extend(
            searchable_attributes(related)
                .into_iter()
                .filter_map(|attr| build_predicate(attr, params, &alias)),
        );
        outcome.joins.push(JoinClause {
            kind: join_kind,
            table: related.table_name.clone(),
            alias,
            left,
            right,
        });
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeKind, SchemaRegistry};
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(vec![
            EntitySchema::new("User", "users", "id")
                .attribute("id", AttributeKind::Integer)
                .attribute("name", AttributeKind::String)
                .attribute("city_id", AttributeKind::Integer)
                .belongs_to("City", "city_id")
                .has_many("Order", "user_id"),
            EntitySchema::new("City", "cities", "id")
                .attribute("id", AttributeKind::Integer)
                .attribute("title", AttributeKind::String),
            EntitySchema::new("Order", "orders", "id")
                .attribute("id", AttributeKind::Integer)
                .attribute("user_id", AttributeKind::Integer)
                .attribute("total", AttributeKind::Float)
                .attribute("title", AttributeKind::String)
                .belongs_to("User", "user_id"),
            EntitySchema::new("Category", "categories", "id")
                .attribute("id", AttributeKind::Integer)
                .attribute("label", AttributeKind::String)
                .attribute("parent_id", AttributeKind::Integer)
                .belongs_to("Category", "parent_id"),
        ])
        .unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    fn test_belongs_to_left_joins_on_primary_key(registry: SchemaRegistry) {
        let user = registry.entity("User").unwrap();
        let mut aliases = AliasAllocator::new("users");
        let outcome =
            join_belongs_to(&registry, user, &params(&[("title", "York")]), &mut aliases).unwrap();

        assert_eq!(
            outcome.joins,
            vec![JoinClause {
                kind: JoinKind::LeftOuter,
                table: "cities".to_string(),
                alias: "cities".to_string(),
                left: Column::new("users", "city_id"),
                right: Column::new("cities", "id"),
            }]
        );
        assert_eq!(outcome.predicates.len(), 1);
        assert_eq!(outcome.predicates[0].column(), &Column::new("cities", "title"));
    }

    #[rstest]
    fn test_has_many_right_joins_on_foreign_key(registry: SchemaRegistry) {
        let user = registry.entity("User").unwrap();
        let mut aliases = AliasAllocator::new("users");
        let outcome = join_has_many(
            &registry,
            user,
            &params(&[("total", ">10"), ("user_id", "3")]),
            &mut aliases,
        )
        .unwrap();

        assert_eq!(outcome.joins.len(), 1);
        let join = &outcome.joins[0];
        assert_eq!(join.kind, JoinKind::RightOuter);
        assert_eq!(join.left, Column::new("users", "id"));
        assert_eq!(join.right, Column::new("orders", "user_id"));

        // user_id is a foreign key of Order, so only total is filtered
        assert_eq!(outcome.predicates.len(), 1);
        assert_eq!(outcome.predicates[0].column(), &Column::new("orders", "total"));
    }

    #[rstest]
    fn test_has_many_key_undeclared_on_related_is_filtered() {
        // Only the related entity's own associations make a column a key.
        let registry = SchemaRegistry::new(vec![
            EntitySchema::new("User", "users", "id")
                .attribute("id", AttributeKind::Integer)
                .has_many("Note", "user_id"),
            EntitySchema::new("Note", "notes", "id")
                .attribute("id", AttributeKind::Integer)
                .attribute("user_id", AttributeKind::Integer)
                .attribute("body", AttributeKind::Text),
        ])
        .unwrap();
        let user = registry.entity("User").unwrap();
        let mut aliases = AliasAllocator::new("users");
        let outcome = join_has_many(
            &registry,
            user,
            &params(&[("user_id", "3"), ("body", "x")]),
            &mut aliases,
        )
        .unwrap();

        let columns: Vec<_> = outcome.predicates.iter().map(|p| p.column().clone()).collect();
        assert_eq!(
            columns,
            vec![Column::new("notes", "user_id"), Column::new("notes", "body")]
        );
    }

    #[rstest]
    fn test_shared_param_name_filters_each_related_table(registry: SchemaRegistry) {
        let user = registry.entity("User").unwrap();
        let p = params(&[("title", "x")]);
        let mut aliases = AliasAllocator::new("users");

        let mut outcome = join_belongs_to(&registry, user, &p, &mut aliases).unwrap();
        outcome.extend(join_has_many(&registry, user, &p, &mut aliases).unwrap());

        let qualifiers: Vec<_> = outcome
            .predicates
            .iter()
            .map(|p| p.column().qualifier.as_str())
            .collect();
        assert_eq!(qualifiers, vec!["cities", "orders"]);
    }

    #[rstest]
    fn test_self_association_gets_distinct_alias(registry: SchemaRegistry) {
        let category = registry.entity("Category").unwrap();
        let mut aliases = AliasAllocator::new("categories");
        let outcome = join_belongs_to(
            &registry,
            category,
            &params(&[("label", "Books")]),
            &mut aliases,
        )
        .unwrap();

        let join = &outcome.joins[0];
        assert_eq!(join.table, "categories");
        assert_eq!(join.alias, "categories_2");
        assert_eq!(join.left, Column::new("categories", "parent_id"));
        assert_eq!(join.right, Column::new("categories_2", "id"));
        assert_eq!(
            outcome.predicates[0].column(),
            &Column::new("categories_2", "label")
        );
    }

    #[rstest]
    fn test_no_associations_yields_empty(registry: SchemaRegistry) {
        let city = registry.entity("City").unwrap();
        let mut aliases = AliasAllocator::new("cities");
        let outcome = join_has_many(&registry, city, &params(&[]), &mut aliases).unwrap();
        assert_eq!(outcome, JoinOutcome::default());
    }

    #[rstest]
    fn test_alias_allocator() {
        let mut aliases = AliasAllocator::new("users");
        assert_eq!(aliases.allocate("cities"), "cities");
        assert_eq!(aliases.allocate("users"), "users_2");
        assert_eq!(aliases.allocate("cities"), "cities_2");
        assert_eq!(aliases.allocate("users"), "users_3");
    }

    struct Unvalidated(EntitySchema);

    impl SchemaDescriptor for Unvalidated {
        fn entity(&self, name: &str) -> Option<&EntitySchema> {
            (name == self.0.name).then_some(&self.0)
        }
    }

    #[rstest]
    fn test_unknown_related_entity_surfaces_schema_error() {
        let schema = Unvalidated(
            EntitySchema::new("User", "users", "id")
                .attribute("id", AttributeKind::Integer)
                .attribute("city_id", AttributeKind::Integer)
                .belongs_to("City", "city_id"),
        );
        let mut aliases = AliasAllocator::new("users");
        let err = join_belongs_to(&schema, &schema.0, &params(&[]), &mut aliases).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRelatedEntity { .. }));
    }
}
