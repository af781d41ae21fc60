//! Configuration file handling.
//!
//! Loads the optional `.row_search.json` file from the current directory and
//! merges it with command-line overrides into the effective [`Settings`].

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use db::Dialect;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE: &str = ".row_search.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Schema document; relative paths are resolved against the config file's directory
    #[serde(default)]
    pub schema: Option<PathBuf>,

    /// Target SQL dialect
    #[serde(default)]
    pub dialect: Option<Dialect>,
}

impl ConfigFile {
    /// Load `.row_search.json` from the current directory, if there is one.
    pub fn load() -> Result<Option<Self>, Box<dyn Error>> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load a configuration file from `path`.
    ///
    /// A missing file is not an error and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its JSON is invalid.
    pub fn load_from(path: &Path) -> Result<Option<Self>, Box<dyn Error>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let mut config: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;

        if let Some(schema) = config.schema.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.schema = Some(if schema.is_relative() { base.join(schema) } else { schema });
        }

        Ok(Some(config))
    }
}

/// Effective settings after applying command-line overrides to the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub schema: PathBuf,
    pub dialect: Dialect,
}

impl Settings {
    /// Command-line values win over the config file. The dialect falls back to
    /// MySQL; the schema path has no default.
    pub fn resolve(
        schema: Option<PathBuf>,
        dialect: Option<Dialect>,
        config: Option<ConfigFile>,
    ) -> Result<Self, Box<dyn Error>> {
        let config = config.unwrap_or_default();

        let schema = schema.or(config.schema).ok_or_else(|| {
            format!(
                "No schema document given.\n\n\
                 Pass --schema <PATH> or create a {} file in the current directory:\n\
                 {{\n  \
                   \"schema\": \"schema.json\",\n  \
                   \"dialect\": \"mysql\"\n\
                 }}\n",
                CONFIG_FILE
            )
        })?;

        Ok(Self {
            schema,
            dialect: dialect.or(config.dialect).unwrap_or_default(),
        })
    }
}
