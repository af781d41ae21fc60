//! Output formatting for validate command results.

use super::execute::{EntitySummary, ValidateResult};
use crate::output::{Outputable, section};

fn format_summary(entity: &EntitySummary) -> String {
    format!(
        "{} ({}): {} attributes, {} searchable, {} belongs-to, {} has-many",
        entity.name,
        entity.table,
        entity.attributes,
        entity.searchable,
        entity.belongs_to,
        entity.has_many
    )
}

impl Outputable for ValidateResult {
    fn to_table(&self) -> String {
        format!(
            "Schema OK: {}\n\n{}",
            self.schema,
            section("Entities", self.entities.iter().map(format_summary))
        )
    }
}
