//! Entity schema descriptions.
//!
//! The search engine never introspects a database itself. It works from a
//! description of each entity handed over by an external source:
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `AttributeKind` - closed set of column kinds the search understands
//!    - `Attribute` - a named, typed column
//!    - `Association` - a belongs-to or has-many link to another entity
//!    - `EntitySchema` - table, primary key, attributes and associations
//!
//! 2. **Registry** (`registry.rs`):
//!    - `SchemaRegistry` - validated, read-only set of entities, loaded once
//!      at startup from code or from a JSON schema document
//!
//! Anything that can answer the questions in [`SchemaDescriptor`] can drive
//! a search; `SchemaRegistry` is the implementation used in practice.

mod definition;
mod registry;

pub use definition::{Association, AssociationKind, Attribute, AttributeKind, EntitySchema};
pub use registry::{SchemaDocument, SchemaRegistry};

use thiserror::Error;

/// Structural problems in a schema description.
///
/// These are configuration errors. A [`SchemaRegistry`] reports them when it
/// is built and never at request time; a descriptor that skips validation
/// may still surface them while composing a search.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Entity '{entity}' is declared more than once")]
    DuplicateEntity { entity: String },

    #[error("Entity '{entity}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { entity: String, attribute: String },

    #[error("Primary key '{primary_key}' of entity '{entity}' is not one of its attributes")]
    MissingPrimaryKey { entity: String, primary_key: String },

    #[error("Entity '{entity}' has a {kind} association to unknown entity '{related}'")]
    UnknownRelatedEntity {
        entity: String,
        kind: AssociationKind,
        related: String,
    },

    #[error(
        "Entity '{entity}' declares table '{declared}' for '{related}', but '{related}' lives in '{actual}'"
    )]
    RelatedTableMismatch {
        entity: String,
        related: String,
        declared: String,
        actual: String,
    },

    #[error("Foreign key '{foreign_key}' of {kind} association '{entity}' -> '{related}' is not a column of '{owner}'")]
    MissingForeignKey {
        entity: String,
        kind: AssociationKind,
        related: String,
        foreign_key: String,
        owner: String,
    },

    #[error("Invalid identifier '{identifier}' in entity '{entity}'")]
    InvalidIdentifier { entity: String, identifier: String },

    #[error("Failed to read schema file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid schema document: {message}")]
    Parse { message: String },
}

/// Read-only access to entity descriptions.
///
/// This is the whole contract the search engine needs from a schema source.
/// Only [`SchemaDescriptor::entity`] is required; the rest are derived from it.
pub trait SchemaDescriptor: Send + Sync {
    /// Look up an entity by name.
    fn entity(&self, name: &str) -> Option<&EntitySchema>;

    fn primary_key(&self, entity: &str) -> Option<&str> {
        self.entity(entity).map(|e| e.primary_key.as_str())
    }

    fn attributes(&self, entity: &str) -> Option<&[Attribute]> {
        self.entity(entity).map(|e| e.attributes.as_slice())
    }

    /// Associations of the given kind, in declaration order.
    ///
    /// Unknown entities have no associations.
    fn associations(&self, entity: &str, kind: AssociationKind) -> Vec<&Association> {
        self.entity(entity)
            .map(|e| e.associations_of(kind).collect())
            .unwrap_or_default()
    }

    fn table_name(&self, entity: &str) -> Option<&str> {
        self.entity(entity).map(|e| e.table_name.as_str())
    }
}
