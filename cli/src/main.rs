use clap::Parser;

mod cli;
mod commands;
mod config;
pub mod output;
#[macro_use]
mod test_macros;
use cli::Args;
use commands::Context;
use config::{ConfigFile, Settings};
use db::SchemaRegistry;

const ENV_LOG: &str = "ROW_SEARCH_LOG";

/// Logs go to stderr so command output on stdout stays parseable.
fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let settings = Settings::resolve(args.schema, args.dialect, ConfigFile::load()?)?;
    tracing::debug!(schema = %settings.schema.display(), dialect = %settings.dialect, "settings resolved");

    let registry = SchemaRegistry::from_path(&settings.schema)?;
    let ctx = Context {
        schema_path: settings.schema,
        registry,
        dialect: settings.dialect,
    };

    let output = args.command.run(&ctx, args.format)?;
    println!("{}", output);
    Ok(())
}
