use std::error::Error;

use serde::Serialize;

use super::ValidateCmd;
use crate::commands::{Context, Execute};
use db::{AssociationKind, searchable_attributes};

#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    pub name: String,
    pub table: String,
    pub attributes: usize,
    pub searchable: usize,
    pub belongs_to: usize,
    pub has_many: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub schema: String,
    pub entities: Vec<EntitySummary>,
}

impl Execute for ValidateCmd {
    type Output = ValidateResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let entities = ctx
            .registry
            .entities()
            .iter()
            .map(|entity| EntitySummary {
                name: entity.name.clone(),
                table: entity.table_name.clone(),
                attributes: entity.attributes.len(),
                searchable: searchable_attributes(entity).len(),
                belongs_to: entity.associations_of(AssociationKind::BelongsTo).count(),
                has_many: entity.associations_of(AssociationKind::HasMany).count(),
            })
            .collect();

        Ok(ValidateResult {
            schema: ctx.schema_path.display().to_string(),
            entities,
        })
    }
}
