//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use db::Dialect;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON schema document
    ///
    /// Overrides the "schema" entry of .row_search.json.
    #[arg(long, global = true)]
    pub schema: Option<PathBuf>,

    /// SQL dialect for compiled queries [default: mysql]
    ///
    /// Overrides the "dialect" entry of .row_search.json.
    #[arg(long, value_enum, global = true)]
    pub dialect: Option<Dialect>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}
