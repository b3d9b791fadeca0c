use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::analyzer::{AnalysisSettings, EligibilityPolicy};
use crate::units::UnitScheme;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "CONFIG_FILE";

/// Optional TOML configuration; every section and key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub policy: EligibilityPolicy,
    #[serde(default)]
    pub units: UnitScheme,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Directory for auto-named reports; an explicit output path ignores it.
    pub directory: Option<String>,
}

impl AppConfig {
    /// Load from `path`, else from `$CONFIG_FILE`, else built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::load_from_str(&s).with_context(|| format!("loading config {}", path.display()))
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.output.directory {
            anyhow::ensure!(
                !dir.trim().is_empty(),
                "output.directory must be non-empty when set"
            );
        }
        Ok(())
    }

    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            policy: self.analysis.policy,
            units: self.analysis.units,
        }
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.output.directory.as_deref().map(Path::new)
    }
}
