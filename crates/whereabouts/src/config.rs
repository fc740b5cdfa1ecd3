//! Resolution of the effective fetch configuration.
//!
//! Precedence: CLI flags > selected profile > file defaults > built-ins.

use std::time::Duration;

use whereabouts_config as cfg;
use whereabouts_core::FetchConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build the effective [`FetchConfig`] from the config file and flags.
pub fn build_fetch_config(global: &GlobalOpts) -> Result<FetchConfig, CliError> {
    let file = cfg::load_config()?;
    let profile_name = cfg::active_profile_name(global.profile.as_deref(), &file);

    let mut fetch = if file.profiles.contains_key(&profile_name) {
        cfg::profile_to_fetch_config(&file, &profile_name)?
    } else if global.profile.is_some() {
        // An explicitly requested profile must exist.
        return Err(CliError::ProfileNotFound { name: profile_name });
    } else {
        FetchConfig {
            results: file.defaults.results,
            timeout: Duration::from_secs(file.defaults.timeout),
            ..FetchConfig::default()
        }
    };

    // CLI flag overrides
    if let Some(ref endpoint) = global.endpoint {
        fetch.endpoint = endpoint.parse().map_err(|e| CliError::Validation {
            field: "endpoint".into(),
            reason: format!("invalid URL: {e}"),
        })?;
    }
    if let Some(results) = global.results {
        fetch.results = results;
    }
    if let Some(ref seed) = global.seed {
        fetch.seed = Some(seed.clone());
    }
    if let Some(ref nat) = global.nat {
        fetch.nat = Some(nat.clone());
    }
    if let Some(timeout) = global.timeout {
        fetch.timeout = Duration::from_secs(timeout);
    }

    Ok(fetch)
}
