pub mod analyze;
pub mod config;
pub mod popup;
pub mod relay;
pub mod serve;

use crate::config::{AnalysisProvider, AppConfig};
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load configuration from `--config` (or ./fakecheck.toml) and the environment
pub fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    let config = AppConfig::load_from(path).map_err(|e| {
        AppError::Config(format!(
            "{}. Check fakecheck.toml or the FAKECHECK__<SECTION>__<KEY> environment variables",
            e
        ))
    })?;
    debug!("Configuration loaded");
    Ok(config)
}

/// Apply `--provider` / `--model` overrides
pub fn apply_analysis_overrides(
    config: &mut AppConfig,
    provider: Option<&str>,
    model: Option<&str>,
) -> AppResult<()> {
    if let Some(provider) = provider {
        let provider: AnalysisProvider = provider.parse().map_err(AppError::Config)?;
        info!("Analysis provider overridden: {}", provider.as_str());
        config.analysis.provider = provider;
    }
    if let Some(model) = model {
        config.analysis.model = model.to_string();
    }
    Ok(())
}

/// Write output to file with safe directory creation
pub fn write_output_to_file(path: &PathBuf, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}
