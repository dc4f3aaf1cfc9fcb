use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use nagl_batch::BatchConfig;

use crate::cli::{GraphRows, IoOptions};

/// Contents of an `nbatch` settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub batch: BatchConfig,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings = toml::from_str(&text)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Loads the settings named by `io` and applies command-line overrides.
pub fn resolve(io: &IoOptions, graph_rows: Option<GraphRows>) -> Result<Settings> {
    let mut settings = Settings::load(io.config.as_deref())?;
    if let Some(rows) = graph_rows {
        settings.batch.graph_rows = rows.into();
    }
    if io.compact {
        settings.output.pretty = false;
    }
    Ok(settings)
}
