//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
#[derive(Debug, Clone, Copy)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn cast_decimal(&self, expr: &str) -> String {
        format!("CAST({} AS NUMERIC)", expr)
    }

    fn boolean_text(&self, expr: &str) -> String {
        format!("CAST({} AS TEXT)", expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(3), "?");
    }

    #[test]
    fn test_casts() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.cast_decimal("x"), "CAST(x AS NUMERIC)");
        assert_eq!(dialect.boolean_text("x"), "CAST(x AS TEXT)");
    }
}
