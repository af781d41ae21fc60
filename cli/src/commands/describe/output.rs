//! Output formatting for describe command results.

use super::execute::{AssociationEntry, DescribeResult};
use crate::output::{Outputable, section};

fn format_association(assoc: &AssociationEntry) -> String {
    format!("{} ({}) ON {} = {}", assoc.entity, assoc.table, assoc.left, assoc.right)
}

impl Outputable for DescribeResult {
    fn to_table(&self) -> String {
        let attributes = self
            .attributes
            .iter()
            .map(|attr| format!("{}: {} ({})", attr.name, attr.type_name, attr.role.as_str()));

        [
            format!("Entity: {}", self.entity),
            format!("Table: {}", self.table),
            format!("Primary key: {}", self.primary_key),
            String::new(),
            section("Attributes", attributes),
            String::new(),
            section("Belongs to", self.belongs_to.iter().map(format_association)),
            String::new(),
            section("Has many", self.has_many.iter().map(format_association)),
        ]
        .join("\n")
    }
}
