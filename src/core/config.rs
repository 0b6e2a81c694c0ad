//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfinder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfinderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub venue_file: Option<String>,
    pub default_floor: Option<String>,
    pub result_limit: Option<usize>,
    pub log_level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_VENUE_FILE: &str = "venue.json";
pub const DEFAULT_RESULT_LIMIT: usize = 50;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub venue_file: PathBuf,
    /// `None` means "first floor in display order".
    pub default_floor: Option<String>,
    pub result_limit: usize,
    pub log_level: LevelFilter,
}

/// Values that came from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub venue_file: Option<PathBuf>,
    pub default_floor: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.wayfinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wayfinder").join("config.toml"))
}

/// Load config from `~/.wayfinder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfinderConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WayfinderConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(WayfinderConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<WayfinderConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WayfinderConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: WayfinderConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Wayfinder Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# venue_file = "venue.json"     # Or set WAYFINDER_VENUE, or pass --venue
# default_floor = "ground"      # Or set WAYFINDER_DEFAULT_FLOOR, or pass --floor
# result_limit = 50             # Max search results shown in the sidebar
# log_level = "debug"           # "error", "warn", "info", "debug", "trace"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WayfinderConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &WayfinderConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Venue file: CLI → env → config → default
    let venue_file = cli
        .venue_file
        .clone()
        .or_else(|| env("WAYFINDER_VENUE").map(PathBuf::from))
        .or_else(|| config.general.venue_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VENUE_FILE));

    // Default floor: CLI → env → config → first floor
    let default_floor = cli
        .default_floor
        .clone()
        .or_else(|| env("WAYFINDER_DEFAULT_FLOOR"))
        .or_else(|| config.general.default_floor.clone());

    let log_level = match config.general.log_level.as_deref() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", raw, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        venue_file,
        default_floor,
        result_limit: config
            .general
            .result_limit
            .unwrap_or(DEFAULT_RESULT_LIMIT),
        log_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = WayfinderConfig::default();
        assert!(config.general.venue_file.is_none());
        assert!(config.general.default_floor.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&WayfinderConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.venue_file, PathBuf::from(DEFAULT_VENUE_FILE));
        assert_eq!(resolved.default_floor, None);
        assert_eq!(resolved.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = WayfinderConfig {
            general: GeneralConfig {
                venue_file: Some("/srv/expo.json".to_string()),
                default_floor: Some("first".to_string()),
                result_limit: Some(5),
                log_level: Some("warn".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.venue_file, PathBuf::from("/srv/expo.json"));
        assert_eq!(resolved.default_floor.as_deref(), Some("first"));
        assert_eq!(resolved.result_limit, 5);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = WayfinderConfig {
            general: GeneralConfig {
                venue_file: Some("from-config.json".to_string()),
                default_floor: Some("ground".to_string()),
                ..Default::default()
            },
        };
        let env = |key: &str| match key {
            "WAYFINDER_VENUE" => Some("from-env.json".to_string()),
            "WAYFINDER_DEFAULT_FLOOR" => Some("first".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.venue_file, PathBuf::from("from-env.json"));
        assert_eq!(resolved.default_floor.as_deref(), Some("first"));

        let cli = CliOverrides {
            venue_file: Some(PathBuf::from("from-cli.json")),
            default_floor: Some("roof".to_string()),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.venue_file, PathBuf::from("from-cli.json"));
        assert_eq!(resolved.default_floor.as_deref(), Some("roof"));
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = WayfinderConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
default_floor = "mezzanine"
"#;
        let config: WayfinderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_floor.as_deref(), Some("mezzanine"));
        assert!(config.general.venue_file.is_none());
        assert!(config.general.result_limit.is_none());
    }

    #[test]
    fn test_missing_file_generates_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.venue_file.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Wayfinder Configuration"));
        // The template is all comments, so it loads back as defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.general.default_floor.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nresult_limit = \"lots\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
