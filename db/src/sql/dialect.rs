//! SQL dialect trait for multi-database support

/// Database-specific pieces of SQL syntax.
///
/// Different databases disagree on:
/// - Parameter placeholders (`?` vs `$1`)
/// - Identifier quoting (backticks vs double quotes)
/// - Casting a column to a comparable number or to text
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - MySQL/SQLite: always `?`
    /// - PostgreSQL: `$1`, `$2`, ...
    fn placeholder(&self, index: usize) -> String;

    /// Quote a table, alias or column name.
    ///
    /// Identifiers are validated against the schema before they get here, so
    /// quoting only guards against reserved words.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Cast an expression to a decimal number.
    ///
    /// Tolerates numeric data stored in string columns.
    fn cast_decimal(&self, expr: &str) -> String;

    /// Render a boolean expression as the text `"1"` or `"0"`.
    fn boolean_text(&self, expr: &str) -> String;
}
