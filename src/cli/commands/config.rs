use super::load_config;
use crate::errors::AppResult;
use clap::Args;
use std::path::Path;

/// Print the effective configuration as TOML (API keys masked)
#[derive(Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let config = load_config(config_path)?;
        print!("{}", toml::to_string_pretty(&config.redacted())?);
        Ok(())
    }
}
