//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
#[derive(Debug, Clone, Copy)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn cast_decimal(&self, expr: &str) -> String {
        format!("CAST({} AS NUMERIC)", expr)
    }

    fn boolean_text(&self, expr: &str) -> String {
        // boolean -> text gives 'true'/'false', so go through integer first
        format!("CAST(CAST({} AS INTEGER) AS TEXT)", expr)
    }
}
