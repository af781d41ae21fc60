mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

/// Compose a search over an entity and print the compiled SQL
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  row_search compose User name=Joh                  # Name contains \"Joh\"
  row_search compose User age=18-30 active=yes      # Range plus boolean
  row_search compose User title=Lon --belongs-to    # Filter joined cities too
  row_search compose User total='>=100' --has-many  # Users with a large order
  row_search compose User name=a title=a --only name
  row_search compose User --request search.json     # Request as JSON")]
pub struct ComposeCmd {
    /// Entity to search
    pub entity: String,

    /// Filters as NAME=VALUE pairs
    ///
    /// Text attributes match substrings, numeric ones accept `n`, `a-b`,
    /// `<n`, `<=n`, `>n` and `>=n`, booleans accept true/yes/1.
    #[arg(value_name = "NAME=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Also join and filter belongs-to associations
    #[arg(long)]
    pub belongs_to: bool,

    /// Also join and filter has-many associations
    #[arg(long)]
    pub has_many: bool,

    /// Only filter the root entity on these attributes (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Read the search request from a JSON file; other options are applied on top
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,
}

/// Split `NAME=VALUE` on the first `=`. The value may itself contain `=`.
fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{}`", s)),
    }
}
