use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::PipeviewError;

/// Configuration file structure for pipeview.
///
/// Holds the display locale and output preferences so they need not be
/// repeated on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Locale tag used for dates and durations (e.g. 'en', 'de-AT')
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,

    /// Live view settings
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WatchConfig {
    /// How often live values advance, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            output: OutputConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./pipeview.toml
    /// 3. ./pipeview.json
    /// 4. ./pipeview.yaml
    /// 5. ./pipeview.yml
    /// 6. `<config dir>/pipeview/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = ["pipeview.toml", "pipeview.json", "pipeview.yaml", "pipeview.yml"]
            .into_iter()
            .map(PathBuf::from)
            .chain(user_config_path());

        for path in candidates {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        let config: Self = match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            _ => {
                // Try TOML first, then JSON, then YAML
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Rejects values no formatter can work with.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.locale.trim().is_empty() {
            return Err(PipeviewError::Config("locale must not be empty".to_string()));
        }
        if self.watch.tick_interval_ms == 0 {
            return Err(PipeviewError::Config(
                "tick-interval-ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("yaml" | "yml") => serde_yaml::to_string(self)?,
            _ => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pipeview").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(!config.output.pretty);
        assert_eq!(config.watch.tick_interval_ms, 1000);
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
locale = "de-AT"

[output]
format = "json"
pretty = true

[watch]
tick-interval-ms = 250
"#;
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.locale, "de-AT");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert_eq!(config.watch.tick_interval_ms, 250);
    }

    #[test]
    fn test_load_json_config() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp_file, r#"{{"locale": "fr", "output": {{"format": "table"}}}}"#).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.watch.tick_interval_ms, 1000);
    }

    #[test]
    fn test_load_yaml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(temp_file, "locale: es\nwatch:\n  tick-interval-ms: 500\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.locale, "es");
        assert_eq!(config.watch.tick_interval_ms, 500);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load(Some(Path::new("nonexistent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_tick_interval_rejected() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "[watch]\ntick-interval-ms = 0\n").unwrap();

        let err = Config::load_from_path(temp_file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("tick-interval-ms"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pipeview.toml");

        let config = Config {
            locale: "nl".to_string(),
            output: OutputConfig {
                format: OutputFormat::Json,
                pretty: true,
            },
            watch: WatchConfig {
                tick_interval_ms: 2000,
            },
        };
        config.save(&path).unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.locale, "nl");
        assert_eq!(reloaded.output.format, OutputFormat::Json);
        assert_eq!(reloaded.watch.tick_interval_ms, 2000);
    }
}
