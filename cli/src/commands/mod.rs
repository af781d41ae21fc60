//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `execute` module producing a serializable result
//! - An `output` module rendering that result as a table

mod compose;
mod describe;
mod validate;

pub use compose::ComposeCmd;
pub use describe::DescribeCmd;
pub use validate::ValidateCmd;

use clap::Subcommand;
use std::error::Error;
use std::path::PathBuf;

use db::{Dialect, SchemaRegistry};

use crate::output::{OutputFormat, Outputable};

/// Everything a command needs: the loaded schema and the target dialect.
pub struct Context {
    pub schema_path: PathBuf,
    pub registry: SchemaRegistry,
    pub dialect: Dialect,
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose a search over an entity and print the compiled SQL
    Compose(ComposeCmd),

    /// Show an entity's table, keys, searchable attributes and associations
    Describe(DescribeCmd),

    /// Validate the schema document and list its entities
    Validate(ValidateCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Compose(cmd) => {
                let result = cmd.execute(ctx)?;
                Ok(result.format(format))
            }
            Command::Describe(cmd) => {
                let result = cmd.execute(ctx)?;
                Ok(result.format(format))
            }
            Command::Validate(cmd) => {
                let result = cmd.execute(ctx)?;
                Ok(result.format(format))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_context {
    use super::Context;
    use db::Dialect;
    use db::test_utils::shop_registry;

    /// Shop schema compiled for `dialect`.
    pub fn shop_context(dialect: Dialect) -> Context {
        Context {
            schema_path: "shop.json".into(),
            registry: shop_registry(),
            dialect,
        }
    }
}
