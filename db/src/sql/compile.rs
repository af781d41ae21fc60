//! Compile a composed query to SQL text plus bound values.

use serde::Serialize;

use super::{SqlDialect, SqlValue};
use crate::composer::ComposedQuery;
use crate::predicate::{Column, Predicate};

/// A compiled query ready for execution.
///
/// Contains the dialect-specific SQL and every value to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl CompiledQuery {
    /// Get the number of parameters in this query.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

/// Render `query` for `dialect`.
///
/// ```text
/// SELECT DISTINCT <root>.* FROM <root>
///   <kind> JOIN <table> <alias> ON <left> = <right> ...
///   WHERE <predicate> AND <predicate> ...
/// ```
pub fn compile_query(query: &ComposedQuery, dialect: &dyn SqlDialect) -> CompiledQuery {
    let projection = query.projection();
    let mut sql = format!(
        "SELECT {}{}.* FROM {}",
        if projection.distinct { "DISTINCT " } else { "" },
        dialect.quote_identifier(&projection.table),
        dialect.quote_identifier(query.root_table()),
    );

    for join in query.joins() {
        sql.push_str(&format!(
            " {} {} {} ON {} = {}",
            join.kind.keyword(),
            dialect.quote_identifier(&join.table),
            dialect.quote_identifier(&join.alias),
            column_sql(&join.left, dialect),
            column_sql(&join.right, dialect),
        ));
    }

    let mut next_index = 1;
    let conditions: Vec<String> = query
        .predicates()
        .iter()
        .map(|p| predicate_sql(p, dialect, &mut next_index))
        .collect();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    CompiledQuery {
        sql,
        params: query.bound_values(),
    }
}

fn column_sql(column: &Column, dialect: &dyn SqlDialect) -> String {
    format!(
        "{}.{}",
        dialect.quote_identifier(&column.qualifier),
        dialect.quote_identifier(&column.name)
    )
}

fn predicate_sql(predicate: &Predicate, dialect: &dyn SqlDialect, next_index: &mut usize) -> String {
    let mut placeholder = || {
        let ph = dialect.placeholder(*next_index);
        *next_index += 1;
        ph
    };
    let column = column_sql(predicate.column(), dialect);

    match predicate {
        Predicate::Contains { .. } => {
            format!("LOWER({}) LIKE LOWER({})", column, placeholder())
        }
        Predicate::Between { .. } => {
            let cast = dialect.cast_decimal(&column);
            let low = placeholder();
            let high = placeholder();
            format!("({} >= {} AND {} <= {})", cast, low, cast, high)
        }
        Predicate::Compare { op, .. } => {
            format!("{} {} {}", dialect.cast_decimal(&column), op, placeholder())
        }
        Predicate::NumericEquals { .. } => {
            format!("{} = {}", dialect.cast_decimal(&column), placeholder())
        }
        Predicate::BooleanEquals { .. } => {
            format!("{} = {}", dialect.boolean_text(&column), placeholder())
        }
        Predicate::Equals { .. } => format!("{} = {}", column, placeholder()),
    }
}
