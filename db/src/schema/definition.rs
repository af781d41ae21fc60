//! Core schema definition types.
//!
//! Describes entities the way the introspection layer hands them over: a
//! table, a primary key, typed attributes and the direct associations to
//! other entities. These types are plain data; validation lives in the
//! registry.

use serde::{Deserialize, Serialize};

/// Attribute type, as far as searching is concerned.
///
/// Every type name the introspection layer can report maps onto one of these
/// kinds. Anything that is not textual, numeric or boolean becomes `Other`
/// and is never filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Short string column (varchar)
    String,
    /// Long text column
    Text,
    /// Integer column
    Integer,
    /// Floating point column
    Float,
    /// Boolean column
    Boolean,
    /// Any other column type (dates, blobs, decimals, ...)
    #[serde(other)]
    Other,
}

impl AttributeKind {
    /// Returns the type name used in schema documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Text => "text",
            AttributeKind::Integer => "integer",
            AttributeKind::Float => "float",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Other => "other",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single column of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Direction of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// The owner holds the foreign key and points at the related primary key.
    BelongsTo,
    /// The related entity holds a foreign key pointing at the owner.
    HasMany,
}

impl AssociationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::BelongsTo => "belongs_to",
            AssociationKind::HasMany => "has_many",
        }
    }
}

impl std::fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direct association from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub kind: AssociationKind,

    /// Name of the related entity
    #[serde(rename = "entity")]
    pub related_entity: String,

    /// Table of the related entity. Filled in by the registry when a schema
    /// document leaves it out.
    #[serde(default, rename = "table", skip_serializing_if = "String::is_empty")]
    pub related_table: String,

    /// Foreign key column. Lives on the owner for `BelongsTo` and on the
    /// related table for `HasMany`.
    pub foreign_key: String,
}

/// A relational entity: one table plus its declared associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,

    #[serde(rename = "table")]
    pub table_name: String,

    pub primary_key: String,

    /// Columns in declaration order
    pub attributes: Vec<Attribute>,

    /// Associations in declaration order
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl EntitySchema {
    /// Start describing an entity. The primary key column must still be added
    /// with [`EntitySchema::attribute`].
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        primary_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            primary_key: primary_key.into(),
            attributes: Vec::new(),
            associations: Vec::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.attributes.push(Attribute::new(name, kind));
        self
    }

    /// Declare a belongs-to association; `foreign_key` is a column of this entity.
    pub fn belongs_to(
        mut self,
        related_entity: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        self.associations.push(Association {
            kind: AssociationKind::BelongsTo,
            related_entity: related_entity.into(),
            related_table: String::new(),
            foreign_key: foreign_key.into(),
        });
        self
    }

    /// Declare a has-many association; `foreign_key` is a column of the related entity.
    pub fn has_many(
        mut self,
        related_entity: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        self.associations.push(Association {
            kind: AssociationKind::HasMany,
            related_entity: related_entity.into(),
            related_table: String::new(),
            foreign_key: foreign_key.into(),
        });
        self
    }

    /// Look up an attribute by name.
    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Foreign keys referenced by any association, in declaration order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &str> {
        self.associations.iter().map(|a| a.foreign_key.as_str())
    }

    /// Associations of one kind, in declaration order.
    pub fn associations_of(&self, kind: AssociationKind) -> impl Iterator<Item = &Association> {
        self.associations.iter().filter(move |a| a.kind == kind)
    }
}
