//! MySQL SQL dialect implementation

use super::SqlDialect;

/// MySQL SQL dialect
#[derive(Debug, Clone, Copy)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn cast_decimal(&self, expr: &str) -> String {
        // bare DECIMAL is DECIMAL(10,0) and rounds away fractions
        format!("CAST({} AS DECIMAL(65,30))", expr)
    }

    fn boolean_text(&self, expr: &str) -> String {
        format!("CAST({} AS CHAR)", expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = MySqlDialect;
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(5), "?");
    }

    #[test]
    fn test_quote_identifier() {
        let dialect = MySqlDialect;
        assert_eq!(dialect.quote_identifier("users"), "`users`");
        assert_eq!(dialect.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_casts() {
        let dialect = MySqlDialect;
        assert_eq!(dialect.cast_decimal("`p`.`price`"), "CAST(`p`.`price` AS DECIMAL(65,30))");
        assert_eq!(dialect.boolean_text("`u`.`active`"), "CAST(`u`.`active` AS CHAR)");
    }

    #[test]
    fn test_cast_decimal_keeps_fractions() {
        // a scale of 0 would turn 1.5 into 2 and drop it from 0.5-1.5
        let cast = MySqlDialect.cast_decimal("x");
        assert!(!cast.ends_with("AS DECIMAL)"));
        assert!(cast.ends_with(",30))"));
    }
}
