mod execute;
mod output;

use clap::Args;

/// Show an entity's table, keys, searchable attributes and associations
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  row_search describe User              # Attributes and associations of User
  row_search describe User -o json      # Same, as JSON")]
pub struct DescribeCmd {
    /// Entity name as declared in the schema
    pub entity: String,
}
