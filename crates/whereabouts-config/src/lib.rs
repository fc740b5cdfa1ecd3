//! Shared configuration for the whereabouts CLI and TUI.
//!
//! TOML profiles with environment overrides, and translation to
//! `whereabouts_core::FetchConfig`. Both binaries depend on this crate;
//! CLI flags layer on top at resolution time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use whereabouts_core::FetchConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    ProfileNotFound { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named fetch profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_results")]
    pub results: u32,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            results: default_results(),
            timeout: default_timeout(),
        }
    }
}

fn default_results() -> u32 {
    20
}
fn default_timeout() -> u64 {
    30
}

/// A named fetch profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API endpoint override (e.g. a self-hosted generator).
    pub endpoint: Option<String>,

    /// Records to request.
    pub results: Option<u32>,

    /// Seed for a reproducible dataset.
    pub seed: Option<String>,

    /// Comma-separated nationality filter (e.g. "us,gb").
    pub nat: Option<String>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "ksc98", "whereabouts").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("whereabouts");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from an explicit path + environment.
///
/// A missing file is not an error -- the defaults apply. Environment
/// variables prefixed `WHEREABOUTS_` override file values
/// (e.g. `WHEREABOUTS_DEFAULTS__RESULTS=50`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("WHEREABOUTS_").split("__"))
        .extract()?;
    Ok(config)
}

/// Write a starter config file with one commented default profile.
/// Refuses to overwrite an existing file.
pub fn write_starter_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Validation {
            field: "path".into(),
            reason: format!("{} already exists", path.display()),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let starter = Config {
        default_profile: Some("default".into()),
        defaults: Defaults::default(),
        profiles: HashMap::from([("default".into(), Profile::default())]),
    };
    let body = toml::to_string_pretty(&starter)?;
    std::fs::write(path, body)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a [`FetchConfig`] from a profile plus the global defaults.
pub fn profile_to_fetch_config(
    config: &Config,
    profile_name: &str,
) -> Result<FetchConfig, ConfigError> {
    let profile = config
        .profiles
        .get(profile_name)
        .ok_or_else(|| ConfigError::ProfileNotFound {
            profile: profile_name.to_owned(),
        })?;

    let mut fetch = FetchConfig::default();

    if let Some(ref endpoint) = profile.endpoint {
        fetch.endpoint = Url::parse(endpoint).map_err(|e| ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("{e}"),
        })?;
    }
    fetch.results = profile.results.unwrap_or(config.defaults.results);
    fetch.seed = profile.seed.clone();
    fetch.nat = profile.nat.clone();
    fetch.timeout = Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout));

    Ok(fetch)
}

/// The profile name to use: explicit request, else the file's
/// `default_profile`, else `"default"`.
pub fn active_profile_name(requested: Option<&str>, config: &Config) -> String {
    requested
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.defaults.results, 20);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn profile_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
                default_profile = "dk"

                [defaults]
                results = 40

                [profiles.dk]
                seed = "nordics"
                nat = "dk,no,se"
                results = 10
            "#,
        );

        let config = load_config_from(&path).unwrap();
        assert_eq!(active_profile_name(None, &config), "dk");

        let fetch = profile_to_fetch_config(&config, "dk").unwrap();
        assert_eq!(fetch.results, 10);
        assert_eq!(fetch.seed.as_deref(), Some("nordics"));
        assert_eq!(fetch.nat.as_deref(), Some("dk,no,se"));
        assert_eq!(fetch.endpoint.as_str(), "https://randomuser.me/api/");
    }

    #[test]
    fn defaults_fill_unset_profile_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
                [defaults]
                results = 7
                timeout = 5

                [profiles.default]
            "#,
        );

        let config = load_config_from(&path).unwrap();
        let fetch = profile_to_fetch_config(&config, "default").unwrap();

        assert_eq!(fetch.results, 7);
        assert_eq!(fetch.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        let err = profile_to_fetch_config(&config, "missing").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { .. }));
    }

    #[test]
    fn invalid_endpoint_is_a_validation_error() {
        let mut config = Config::default();
        config.profiles.insert(
            "bad".into(),
            Profile {
                endpoint: Some("not a url".into()),
                ..Profile::default()
            },
        );

        let err = profile_to_fetch_config(&config, "bad").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn starter_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        write_starter_config(&path).unwrap();
        assert!(path.exists());

        let err = write_starter_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
