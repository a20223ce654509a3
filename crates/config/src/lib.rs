pub mod schema;
pub mod watcher;

pub use schema::{
    DisplayConfig, ModeOverrides, MonitorConfig, SensorConfig, SocmonConfig, ThemeConfig,
    ThermalZone,
};
pub use watcher::ConfigWatcher;

use socmon_core::{MonitorError, Result};
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Load configuration from a TOML file.
///
/// Returns `SocmonConfig::default()` if the file doesn't exist or is not
/// valid TOML.  A key whose value has the wrong type falls back to its
/// default with a warning while the rest of the file still applies.  Only a
/// failure to read an existing file is reported as an error.
pub fn load(path: impl AsRef<Path>) -> Result<SocmonConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(SocmonConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| MonitorError::Config(format!("cannot read '{}': {e}", path.display())))?;

    Ok(parse(&raw))
}

/// Parse config text, applying the same fallbacks as [`load`].
pub fn parse(raw: &str) -> SocmonConfig {
    let table = match toml::from_str::<Table>(raw) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("TOML parse error, using defaults: {e}");
            return SocmonConfig::default();
        }
    };

    match Value::Table(table.clone()).try_into() {
        Ok(cfg) => cfg,
        Err(_) => merge_leniently(table),
    }
}

/// Apply user keys one at a time on top of the defaults, keeping each key
/// only if the result still deserializes.
fn merge_leniently(user: Table) -> SocmonConfig {
    let defaults = SocmonConfig::default();
    let mut merged = match Value::try_from(&defaults) {
        Ok(Value::Table(table)) => table,
        _ => return defaults,
    };

    for (section, value) in user {
        let Value::Table(entries) = value else {
            tracing::warn!("config: '{section}' must be a table; ignoring it");
            continue;
        };
        for (key, value) in entries {
            let mut candidate = merged.clone();
            if let Value::Table(base) = candidate
                .entry(section.clone())
                .or_insert_with(|| Value::Table(Table::new()))
            {
                base.insert(key.clone(), value);
            }

            if Value::Table(candidate.clone()).try_into::<SocmonConfig>().is_ok() {
                merged = candidate;
            } else {
                tracing::warn!("config: invalid value for '{section}.{key}'; using default");
            }
        }
    }

    Value::Table(merged).try_into().unwrap_or(defaults)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("socmon").join("config.toml")
}
