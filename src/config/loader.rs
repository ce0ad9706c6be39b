//! Config file loading

use super::Config;
use crate::error::{Result, TelemetryError};
use std::fs;
use std::path::{Path, PathBuf};

/// Table name accepted as a nested section in either format.
const SECTION: &str = "token-telemetry";

const CANDIDATES: &[&str] = &[
    "token-telemetry.toml",
    ".token-telemetry.toml",
    "token-telemetry.yml",
    "token-telemetry.yaml",
];

/// Load configuration from `config_path`, or discover one in `search_dir`.
///
/// An explicit file must exist and parse. A broken auto-discovered file is
/// reported with a warning and defaults are used instead.
pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    match parse_config_file(&config_file) {
        Ok(cfg) => Ok(cfg),
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!("Ignoring auto-discovered config {}: {}", config_file.display(), e);
            Ok(Config::default())
        }
    }
}

fn parse_config_file(config_file: &Path) -> Result<Config> {
    if !config_file.exists() {
        return Err(TelemetryError::not_found("Config file", config_file));
    }
    let content =
        fs::read_to_string(config_file).map_err(|e| TelemetryError::io(config_file, e))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let invalid = |message: String| TelemetryError::Config {
        path: config_file.to_path_buf(),
        message,
    };

    match ext.as_str() {
        "toml" => parse_toml_config(&content).map_err(invalid),
        "yaml" | "yml" => parse_yaml_config(&content).map_err(invalid),
        other => Err(invalid(format!("unsupported config extension '.{other}'"))),
    }
}

/// Parse TOML, accepting either top-level keys or a `[token-telemetry]` table.
fn parse_toml_config(content: &str) -> std::result::Result<Config, String> {
    let raw: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;
    let value = raw.get(SECTION).cloned().unwrap_or(raw);
    value.try_into().map_err(|e: toml::de::Error| e.to_string())
}

fn parse_yaml_config(content: &str) -> std::result::Result<Config, String> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let value = raw.get(SECTION).cloned().unwrap_or(raw);
    serde_yaml::from_value(value).map_err(|e| e.to_string())
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|c| search_dir.join(c)).find(|p| p.exists())
}
