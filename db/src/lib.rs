//! Schema-driven search composition.
//!
//! Turns a flat map of attribute names to raw string values into joins and
//! typed, parameter-bound predicates against a declared schema, then renders
//! the result as SQL for a chosen dialect. Executing the query is left to the
//! caller.

pub mod classifier;
pub mod composer;
pub mod joiner;
pub mod predicate;
pub mod schema;
pub mod sql;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use classifier::searchable_attributes;
pub use composer::{ComposedQuery, Projection, SearchComposer, SearchError, SearchRequest};
pub use joiner::{JoinClause, JoinKind};
pub use predicate::{Column, CompareOp, Predicate};
pub use schema::{
    Association, AssociationKind, Attribute, AttributeKind, EntitySchema, SchemaDescriptor,
    SchemaError, SchemaRegistry,
};
pub use sql::{CompiledQuery, Dialect, SqlDialect, SqlValue};
