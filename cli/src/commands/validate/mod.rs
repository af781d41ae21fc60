mod execute;
mod execute_tests;
mod output;
mod output_tests;

use clap::Args;

/// Validate the schema document and list its entities
///
/// The schema is checked while it is loaded, so reaching this command means
/// every entity, key and association is consistent.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  row_search validate --schema schema.json
  row_search validate -o json")]
pub struct ValidateCmd {}
