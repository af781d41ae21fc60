//! SQL rendering for composed queries.
//!
//! Provides dialect-specific syntax generation so one composed query can be
//! compiled for MySQL, PostgreSQL or SQLite. Identifiers come from the
//! validated schema; request values are always bound through placeholders.

mod compile;
mod dialect;
mod mysql_dialect;
mod postgres_dialect;
mod sqlite_dialect;
mod value;

pub use compile::{CompiledQuery, compile_query};
pub use dialect::SqlDialect;
pub use mysql_dialect::MySqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;
pub use value::SqlValue;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Target database for compiled SQL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    #[value(name = "mysql")]
    MySql,
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Get the SQL dialect for this target
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::MySql => &MySqlDialect,
            Dialect::Postgres => &PostgresDialect,
            Dialect::Sqlite => &SqliteDialect,
        }
    }

    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
