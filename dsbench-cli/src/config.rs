//! Layered TOML configuration
//!
//! The embedded defaults are overlaid with a user file, table by table:
//! nested tables merge, while scalars and arrays (including the
//! `[[benchmarks]]` list) replace the default outright.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dsbench_core::{BenchmarkSpec, CorpusConfig, RenderConfig};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Config file picked up from the working directory when `--config` is absent
pub const LOCAL_CONFIG_FILE: &str = "dsbench.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DsbenchConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkSpec>,
}

impl Default for DsbenchConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("default config to parse")
    }
}

pub struct ConfigManager {
    path: Option<PathBuf>,
    config: DsbenchConfig,
}

impl ConfigManager {
    /// Load `explicit` (which must exist), or `dsbench.toml` if present
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => {
                bail!("config file not found: {}", path.display())
            }
            Some(path) => Self::load_with_path(path),
            None => Self::load_with_path(LOCAL_CONFIG_FILE),
        }
    }

    /// Defaults merged with the file at `path`, when it exists
    pub fn load_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path: None,
                config: DsbenchConfig::default(),
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = merged_with_defaults(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");

        Ok(Self {
            path: Some(path),
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &DsbenchConfig {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut DsbenchConfig {
        &mut self.config
    }

    /// User file that was merged, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.config).context("failed to serialize config")
    }
}

/// Parse `overlay` and merge it over the embedded defaults
pub fn merged_with_defaults(overlay: &str) -> Result<DsbenchConfig> {
    let mut base: toml::Table = toml::from_str(DEFAULT_CONFIG).context("default config")?;
    let overlay: toml::Table = toml::from_str(overlay)?;
    merge_tables(&mut base, overlay);
    Ok(toml::Value::Table(base).try_into()?)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
