//! Configuration file handling for `~/.nodepulse/config.ini`.
//!
//! Settings structs live in [`super::settings`], constants in
//! [`super::defaults`], parsing in [`super::parser`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::*;
use super::settings::*;

use super::{FetchConfig, PipelineConfig};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read or parse the INI file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Load configuration from the default path (`~/.nodepulse/config.ini`).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Replace the source list with `NODEPULSE_SOURCES` when it is set and
    /// non-empty, falling back to `SOURCE_URLS`.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env_sources(|name| std::env::var(name).ok());
        self
    }

    fn apply_env_sources(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for name in [SOURCES_ENV_VAR, LEGACY_SOURCES_ENV_VAR] {
            if let Some(value) = lookup(name) {
                if self.apply_sources_override(&value) {
                    return;
                }
            }
        }
    }

    /// Returns whether the value held any URL.
    fn apply_sources_override(&mut self, value: &str) -> bool {
        let urls = super::parser::split_urls(value);
        if urls.is_empty() {
            return false;
        }
        self.sources.urls = urls;
        true
    }

    /// Probe/select knobs as a stage configuration value.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_probe_timeout_secs(self.probe.timeout)
            .with_window_size(self.probe.window_size)
            .with_max_nodes(self.probe.max_nodes)
            .with_latency_multiplier(self.probe.latency_multiplier)
            .with_probe_url(self.probe.url.clone())
            .with_top_k(self.select.top_k)
    }

    /// Source download settings.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new(self.sources.urls.clone()).with_timeout_secs(self.sources.timeout)
    }
}

/// Path to the config directory (`~/.nodepulse`).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nodepulse")
}

/// Path to the config file (`~/.nodepulse/config.ini`).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert!(config.sources.urls.is_empty());
        assert_eq!(config.sources.timeout, DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(config.probe.timeout, DEFAULT_PROBE_TIMEOUT_SECS);
        assert_eq!(config.probe.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(config.probe.max_nodes, DEFAULT_MAX_NODES);
        assert_eq!(config.probe.latency_multiplier, DEFAULT_LATENCY_MULTIPLIER);
        assert_eq!(config.select.top_k, DEFAULT_TOP_K);
        assert!(config.logging.file.ends_with("nodepulse.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config.probe.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(config.select.top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn test_sources_override() {
        let mut config = ConfigFile::default();
        config.sources.urls = vec!["https://configured.example".to_string()];

        config.apply_sources_override("   ");
        assert_eq!(config.sources.urls, vec!["https://configured.example"]);

        config.apply_sources_override("https://a.example\nhttps://b.example");
        assert_eq!(
            config.sources.urls,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_legacy_sources_variable() {
        let mut config = ConfigFile::default();
        config.apply_env_sources(env(&[(LEGACY_SOURCES_ENV_VAR, "https://old.example")]));
        assert_eq!(config.sources.urls, vec!["https://old.example"]);
    }

    #[test]
    fn test_primary_sources_variable_wins() {
        let mut config = ConfigFile::default();
        config.apply_env_sources(env(&[
            (SOURCES_ENV_VAR, "https://new.example"),
            (LEGACY_SOURCES_ENV_VAR, "https://old.example"),
        ]));
        assert_eq!(config.sources.urls, vec!["https://new.example"]);

        let mut config = ConfigFile::default();
        config.apply_env_sources(env(&[
            (SOURCES_ENV_VAR, "  "),
            (LEGACY_SOURCES_ENV_VAR, "https://old.example"),
        ]));
        assert_eq!(config.sources.urls, vec!["https://old.example"]);
    }

    #[test]
    fn test_no_sources_variables_keeps_file_list() {
        let mut config = ConfigFile::default();
        config.sources.urls = vec!["https://configured.example".to_string()];

        config.apply_env_sources(env(&[]));

        assert_eq!(config.sources.urls, vec!["https://configured.example"]);
    }

    #[test]
    fn test_pipeline_config_mapping() {
        let mut config = ConfigFile::default();
        config.probe.timeout = 3;
        config.probe.window_size = 7;
        config.probe.max_nodes = 70;
        config.probe.latency_multiplier = 1.5;
        config.select.top_k = 5;

        let pipeline = config.pipeline_config();

        assert_eq!(pipeline.probe_timeout(), Duration::from_secs(3));
        assert_eq!(pipeline.window_size(), 7);
        assert_eq!(pipeline.max_nodes(), 70);
        assert_eq!(pipeline.latency_multiplier(), 1.5);
        assert_eq!(pipeline.top_k(), 5);
        assert_eq!(pipeline.probe_url(), DEFAULT_PROBE_URL);
    }

    #[test]
    fn test_fetch_config_mapping() {
        let mut config = ConfigFile::default();
        config.sources.urls = vec!["https://a.example".to_string()];
        config.sources.timeout = 4;

        let fetch = config.fetch_config();

        assert_eq!(fetch.urls(), ["https://a.example".to_string()]);
        assert_eq!(fetch.timeout(), Duration::from_secs(4));
    }
}
