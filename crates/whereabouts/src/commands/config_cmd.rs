//! `whereabouts config` — inspect and bootstrap the config file.

use whereabouts_config as cfg;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Path => {
            output::print_output(&cfg::config_path().display().to_string());
            Ok(())
        }
        ConfigAction::Show => {
            let config = cfg::load_config()?;
            let body = toml::to_string_pretty(&config)
                .map_err(|e| CliError::Serialize(e.to_string()))?;
            output::print_output(&body);
            Ok(())
        }
        ConfigAction::Init => {
            let path = cfg::config_path();
            cfg::write_starter_config(&path)?;
            output::print_output(&format!("Wrote starter config to {}", path.display()));
            Ok(())
        }
    }
}
