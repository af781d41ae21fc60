//! Output formatting for compose command results.

use super::execute::ComposeResult;
use crate::output::{Outputable, section};
use db::JoinClause;

fn format_join(join: &JoinClause) -> String {
    format!(
        "{} {} AS {} ON {} = {}",
        join.kind.keyword(),
        join.table,
        join.alias,
        join.left,
        join.right
    )
}

impl Outputable for ComposeResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Search: {} ({})", self.entity, self.dialect), String::new()];

        lines.push(section("Joins", self.joins.iter().map(format_join)));
        lines.push(String::new());
        lines.push(section("Predicates", &self.predicates));
        lines.push(String::new());
        lines.push("SQL:".to_string());
        lines.push(format!("  {}", self.sql));
        lines.push(String::new());
        lines.push(section("Params", &self.params));

        lines.join("\n")
    }
}
