//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [sources] section
    if let Some(section) = ini.section(Some("sources")) {
        if let Some(v) = section.get("urls") {
            config.sources.urls = split_urls(v);
        }
        if let Some(v) = section.get("timeout") {
            config.sources.timeout =
                parse_positive(v, "sources", "timeout", "must be a positive integer (seconds)")?;
        }
    }

    // [probe] section
    if let Some(section) = ini.section(Some("probe")) {
        if let Some(v) = section.get("timeout") {
            config.probe.timeout =
                parse_positive(v, "probe", "timeout", "must be a positive integer (seconds)")?;
        }
        if let Some(v) = section.get("window_size") {
            config.probe.window_size =
                parse_positive(v, "probe", "window_size", "must be a positive integer")?;
        }
        if let Some(v) = section.get("max_nodes") {
            config.probe.max_nodes =
                parse_positive(v, "probe", "max_nodes", "must be a positive integer")?;
        }
        if let Some(v) = section.get("latency_multiplier") {
            let parsed: f64 = v.trim().parse().map_err(|_| {
                invalid("probe", "latency_multiplier", v, "must be a positive number")
            })?;
            if !(parsed.is_finite() && parsed > 0.0) {
                return Err(invalid(
                    "probe",
                    "latency_multiplier",
                    v,
                    "must be a positive number",
                ));
            }
            config.probe.latency_multiplier = parsed;
        }
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid("probe", "url", v, "must be an http:// or https:// URL"));
            }
            config.probe.url = v.to_string();
        }
    }

    // [select] section
    if let Some(section) = ini.section(Some("select")) {
        if let Some(v) = section.get("top_k") {
            config.select.top_k =
                parse_positive(v, "select", "top_k", "must be a positive integer")?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.output.directory = expand_tilde(v);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Split a whitespace-separated URL list.
pub(super) fn split_urls(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn parse_positive<T>(
    value: &str,
    section: &str,
    key: &str,
    reason: &str,
) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(invalid(section, key, value, reason)),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
