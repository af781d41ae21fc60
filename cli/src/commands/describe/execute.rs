use std::error::Error;

use serde::Serialize;

use super::DescribeCmd;
use crate::commands::{Context, Execute};
use db::classifier::is_searchable;
use db::predicate::builder_for;
use db::{AssociationKind, Column, EntitySchema, SchemaDescriptor, SchemaError, SearchError};

/// How an attribute takes part in searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeRole {
    /// Primary or foreign key, never filtered on
    Key,
    /// Filtered when a parameter of the same name is given
    Searchable,
    /// Not a key, but of a kind no filter exists for
    Unfilterable,
}

impl AttributeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeRole::Key => "key",
            AttributeRole::Searchable => "searchable",
            AttributeRole::Unfilterable => "unfilterable",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub role: AttributeRole,
}

/// One association with its join condition.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationEntry {
    pub entity: String,
    pub table: String,
    pub left: Column,
    pub right: Column,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeResult {
    pub entity: String,
    pub table: String,
    pub primary_key: String,
    pub attributes: Vec<AttributeEntry>,
    pub belongs_to: Vec<AssociationEntry>,
    pub has_many: Vec<AssociationEntry>,
}

fn attribute_entries(entity: &EntitySchema) -> Vec<AttributeEntry> {
    entity
        .attributes
        .iter()
        .map(|attr| {
            let role = if !is_searchable(entity, &attr.name) {
                AttributeRole::Key
            } else if builder_for(attr.kind).is_none() {
                AttributeRole::Unfilterable
            } else {
                AttributeRole::Searchable
            };
            AttributeEntry {
                name: attr.name.clone(),
                type_name: attr.kind.type_name().to_string(),
                role,
            }
        })
        .collect()
}

fn association_entries(
    schema: &dyn SchemaDescriptor,
    entity: &EntitySchema,
    kind: AssociationKind,
) -> Result<Vec<AssociationEntry>, SchemaError> {
    schema
        .associations(&entity.name, kind)
        .into_iter()
        .map(|assoc| -> Result<AssociationEntry, SchemaError> {
            let related = schema.entity(&assoc.related_entity).ok_or_else(|| {
                SchemaError::UnknownRelatedEntity {
                    entity: entity.name.clone(),
                    kind,
                    related: assoc.related_entity.clone(),
                }
            })?;
            let (left, right) = match kind {
                AssociationKind::BelongsTo => (
                    Column::new(&entity.table_name, &assoc.foreign_key),
                    Column::new(&related.table_name, &related.primary_key),
                ),
                AssociationKind::HasMany => (
                    Column::new(&entity.table_name, &entity.primary_key),
                    Column::new(&related.table_name, &assoc.foreign_key),
                ),
            };
            Ok(AssociationEntry {
                entity: related.name.clone(),
                table: related.table_name.clone(),
                left,
                right,
            })
        })
        .collect()
}

impl Execute for DescribeCmd {
    type Output = DescribeResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let entity = ctx
            .registry
            .entity(&self.entity)
            .ok_or_else(|| SearchError::UnknownEntity {
                entity: self.entity.clone(),
            })?;

        Ok(DescribeResult {
            entity: entity.name.clone(),
            table: entity.table_name.clone(),
            primary_key: entity.primary_key.clone(),
            attributes: attribute_entries(entity),
            belongs_to: association_entries(&ctx.registry, entity, AssociationKind::BelongsTo)?,
            has_many: association_entries(&ctx.registry, entity, AssociationKind::HasMany)?,
        })
    }
}
