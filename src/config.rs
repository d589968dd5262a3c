//! Configuration for the `dlist` tool.
//!
//! [`Config::load`] layers the embedded defaults, an optional TOML file and
//! `DLIST_*` environment variables (`DLIST_RENDER__INDENT_WIDTH=2`).
//! [`Config::defaults`] returns the embedded defaults alone.

use crate::Result;
use crate::diagnostics;
use crate::registry::Registry;

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"
[registry]
builtins = true
lists    = []
files    = []

[render]
indent_width = 3
pretty_json  = true
"#;

const ENV_PREFIX: &str = "DLIST";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[registry]`: what gets registered before any command runs.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_builtins")]
    pub builtins: bool,
    /// Extra list definitions, registered in order after the built-ins.
    #[serde(default)]
    pub lists: Vec<String>,
    /// Files of list definitions, one per line.
    #[serde(default)]
    pub files: Vec<String>,
}

fn default_builtins() -> bool { true }

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtins: default_builtins(),
            lists: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// `[render]`
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Dashes per tree level in select-option text.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_indent_width() -> usize { 3 }
fn default_pretty_json() -> bool { true }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Defaults, then `path` (must exist when given), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("registry.files"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| match path {
                Some(p) => diagnostics::error_message(format!("load config {}", p.display())),
                None => diagnostics::error_message("load config"),
            })
    }

    /// The embedded defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// A registry populated as `[registry]` asks: built-ins, inline lists,
    /// then each file in order.
    pub fn build_registry(&self) -> Result<Registry> {
        let mut registry = if self.registry.builtins {
            Registry::with_builtins()
        } else {
            Registry::new()
        };
        self.populate(&mut registry)?;
        Ok(registry)
    }

    /// Add the configured lists and files to an existing registry.
    pub fn populate(&self, registry: &mut Registry) -> Result<()> {
        registry.add_all(&self.registry.lists);
        for file in &self.registry.files {
            let added = registry.load_file(file)?;
            tracing::debug!(file = %file, added = added.len(), "list file registered");
        }
        Ok(())
    }
}
