//! Search composition: from a raw parameter map to a composed query.
//!
//! # Example
//!
//! ```ignore
//! let registry = SchemaRegistry::from_path(Path::new("schema.json"))?;
//! let composer = SearchComposer::new(&registry);
//!
//! let request = SearchRequest::new()
//!     .param("name", "Joh")
//!     .param("price", "10-100")
//!     .with_belongs_to(true);
//!
//! let query = composer.search("User", &request)?;
//! let compiled = query.to_sql(Dialect::MySql.dialect());
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::classifier::is_searchable;
use crate::joiner::{AliasAllocator, JoinClause, JoinOutcome, join_belongs_to, join_has_many};
use crate::predicate::{Predicate, build_predicate};
use crate::schema::{Attribute, EntitySchema, SchemaDescriptor, SchemaError};
use crate::sql::{CompiledQuery, SqlDialect, SqlValue, compile_query};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unknown entity '{entity}'")]
    UnknownEntity { entity: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// One search call's input.
///
/// Serialized as
/// `{"search_params": {...}, "custom_params": [...] | {...} | null, "has_many": bool, "belongs_to": bool}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Attribute name to raw value
    #[serde(rename = "search_params", default)]
    pub params: BTreeMap<String, String>,

    /// Restrict root-entity filtering to these attributes
    #[serde(
        rename = "custom_params",
        default,
        deserialize_with = "deserialize_custom_attributes",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_attributes: Option<Vec<String>>,

    /// Also join and filter belongs-to associations
    #[serde(default)]
    pub belongs_to: bool,

    /// Also join and filter has-many associations
    #[serde(default)]
    pub has_many: bool,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_belongs_to(mut self, enabled: bool) -> Self {
        self.belongs_to = enabled;
        self
    }

    pub fn with_has_many(mut self, enabled: bool) -> Self {
        self.has_many = enabled;
        self
    }

    pub fn with_custom_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_attributes = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// `custom_params` may be a list of names or a map keyed by name. Only the
/// names are kept; attribute types always come from the schema.
fn deserialize_custom_attributes<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Names(Vec<String>),
        Keyed(BTreeMap<String, serde_json::Value>),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Names(names) => names,
        Repr::Keyed(map) => map.into_keys().collect(),
    }))
}

/// Which rows the query returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Collapse duplicate root rows produced by has-many joins
    pub distinct: bool,
    /// Table whose full row is projected
    pub table: String,
}

/// Joins, predicates and projection for one search, ready for compilation.
///
/// Predicates are combined with `AND`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedQuery {
    root_table: String,
    projection: Projection,
    joins: Vec<JoinClause>,
    predicates: Vec<Predicate>,
}

impl ComposedQuery {
    pub fn root_table(&self) -> &str {
        &self.root_table
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_distinct(&self) -> bool {
        self.projection.distinct
    }

    /// All bound values in placeholder order.
    pub fn bound_values(&self) -> Vec<SqlValue> {
        self.predicates.iter().flat_map(|p| p.bound_values()).collect()
    }

    /// Render as SQL for the given dialect.
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> CompiledQuery {
        compile_query(self, dialect)
    }
}

/// Composes searches against one schema.
///
/// Holds nothing but a shared reference to a read-only schema, so a single
/// composer can serve concurrent searches.
#[derive(Clone, Copy)]
pub struct SearchComposer<'a> {
    schema: &'a dyn SchemaDescriptor,
}

impl<'a> SearchComposer<'a> {
    pub fn new(schema: &'a dyn SchemaDescriptor) -> Self {
        Self { schema }
    }

    /// Compose a search over `entity` and, optionally, its associations.
    ///
    /// Missing parameters and unparsable values contribute nothing. The only
    /// failures are an unknown root entity and schema inconsistencies.
    pub fn search(&self, entity: &str, request: &SearchRequest) -> Result<ComposedQuery, SearchError> {
        let root = self
            .schema
            .entity(entity)
            .ok_or_else(|| SearchError::UnknownEntity {
                entity: entity.to_string(),
            })?;

        let attributes = root_attributes(root, request);

        let mut aliases = AliasAllocator::new(&root.table_name);
        let mut joined = JoinOutcome::default();

        if request.belongs_to {
            joined.extend(join_belongs_to(self.schema, root, &request.params, &mut aliases)?);
        }

        if request.has_many {
            joined.extend(join_has_many(self.schema, root, &request.params, &mut aliases)?);
        }

        let JoinOutcome {
            joins,
            mut predicates,
        } = joined;
        predicates.extend(
            attributes
                .into_iter()
                .filter_map(|attr| build_predicate(attr, &request.params, &root.table_name)),
        );

        tracing::debug!(
            entity,
            joins = joins.len(),
            predicates = predicates.len(),
            "composed search"
        );

        Ok(ComposedQuery {
            root_table: root.table_name.clone(),
            projection: Projection {
                distinct: true,
                table: root.table_name.clone(),
            },
            joins,
            predicates,
        })
    }
}

/// The root attributes to filter on: the custom set when given, else all
/// attributes; keys removed either way. Custom names the entity does not
/// have are dropped, so column names never come from the request.
fn root_attributes<'s>(root: &'s EntitySchema, request: &SearchRequest) -> Vec<&'s Attribute> {
    let candidates: Vec<&'s Attribute> = match &request.custom_attributes {
        Some(names) => {
            let mut seen = HashSet::new();
            names
                .iter()
                .filter(|name| seen.insert(name.as_str()))
                .filter_map(|name| {
                    let found = root.find_attribute(name);
                    if found.is_none() {
                        tracing::trace!(entity = %root.name, attribute = %name, "ignoring unknown custom attribute");
                    }
                    found
                })
                .collect()
        }
        None => root.attributes.iter().collect(),
    };

    candidates
        .into_iter()
        .filter(|attr| is_searchable(root, &attr.name))
        .collect()
}
