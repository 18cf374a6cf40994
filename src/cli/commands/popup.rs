use super::load_config;
use crate::errors::AppResult;
use crate::relay::{LastAnalysisSlot, PopupView};
use clap::Args;
use std::path::{Path, PathBuf};

/// Show the last relayed analysis
#[derive(Args)]
pub struct PopupCommand {
    /// Last-analysis state file (overrides config)
    #[arg(long)]
    state_path: Option<PathBuf>,
}

impl PopupCommand {
    pub fn run(&self, config_path: Option<&Path>) -> AppResult<()> {
        let state_path = match &self.state_path {
            Some(path) => path.clone(),
            None => load_config(config_path)?.relay.state_path,
        };

        let slot = LastAnalysisSlot::load(&state_path)?;
        print!("{}", PopupView::from_slot(&slot));
        Ok(())
    }
}
