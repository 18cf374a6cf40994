use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application configuration loaded from fakecheck.toml and environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub analysis: AnalysisConfig,
    pub server: ServerConfig,
    pub relay: RelayConfig,
    pub export: ExportConfig,
}

/// Remote media download limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub max_bytes: u64,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_bytes: 200 * 1024 * 1024,
            timeout_seconds: 10,
            user_agent: concat!("fakecheck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Which external analysis capability answers the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisProvider {
    Gemini,
    OpenAi,
    Mock,
}

impl AnalysisProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisProvider::Gemini => "gemini",
            AnalysisProvider::OpenAi => "openai",
            AnalysisProvider::Mock => "mock",
        }
    }
}

impl FromStr for AnalysisProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(AnalysisProvider::Gemini),
            "openai" => Ok(AnalysisProvider::OpenAi),
            "mock" => Ok(AnalysisProvider::Mock),
            other => Err(format!(
                "Unknown analysis provider '{}' (expected gemini, openai or mock)",
                other
            )),
        }
    }
}

/// External analysis capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub provider: AnalysisProvider,
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: AnalysisProvider::Gemini,
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: String::new(),
            timeout_seconds: 60,
            max_tokens: 2048,
            temperature: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:9002".to_string(),
        }
    }
}

/// Extension relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub endpoint: String,
    pub api_key: String,
    pub badge_clear_seconds: u64,
    pub overlay_enabled: bool,
    pub state_path: PathBuf,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9002/api/v1/analyze-url".to_string(),
            api_key: String::new(),
            badge_clear_seconds: 5,
            overlay_enabled: true,
            state_path: PathBuf::from("./fakecheck_last_analysis.json"),
        }
    }
}

/// Page geometry and theme for the paginated export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub font_size: f64,
    pub heading_font_size: f64,
    pub line_height: f64,
    pub snapshot_height: f64,
    /// Hex colour, e.g. "#18181B"
    pub background: String,
    pub text_color: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 40.0,
            font_size: 11.0,
            heading_font_size: 14.0,
            line_height: 15.0,
            snapshot_height: 240.0,
            background: "#18181B".to_string(),
            text_color: "#FAFAFA".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            analysis: AnalysisConfig::default(),
            server: ServerConfig::default(),
            relay: RelayConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from ./fakecheck.toml (if present) and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, or ./fakecheck.toml when `path` is None.
    /// Environment variables take precedence over file configuration.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let provider = defaults.analysis.provider.as_str();

        let mut builder = Config::builder()
            .set_default("fetch.max_bytes", defaults.fetch.max_bytes)?
            .set_default("fetch.timeout_seconds", defaults.fetch.timeout_seconds)?
            .set_default("fetch.user_agent", defaults.fetch.user_agent)?
            .set_default("analysis.provider", provider)?
            .set_default("analysis.endpoint", defaults.analysis.endpoint)?
            .set_default("analysis.model", defaults.analysis.model)?
            .set_default("analysis.api_key", defaults.analysis.api_key)?
            .set_default(
                "analysis.timeout_seconds",
                defaults.analysis.timeout_seconds,
            )?
            .set_default("analysis.max_tokens", defaults.analysis.max_tokens as i64)?
            .set_default("analysis.temperature", defaults.analysis.temperature)?
            .set_default("server.bind", defaults.server.bind)?
            .set_default("relay.endpoint", defaults.relay.endpoint)?
            .set_default("relay.api_key", defaults.relay.api_key)?
            .set_default(
                "relay.badge_clear_seconds",
                defaults.relay.badge_clear_seconds,
            )?
            .set_default("relay.overlay_enabled", defaults.relay.overlay_enabled)?
            .set_default(
                "relay.state_path",
                defaults.relay.state_path.to_string_lossy().to_string(),
            )?
            .set_default("export.page_width", defaults.export.page_width)?
            .set_default("export.page_height", defaults.export.page_height)?
            .set_default("export.margin", defaults.export.margin)?
            .set_default("export.font_size", defaults.export.font_size)?
            .set_default(
                "export.heading_font_size",
                defaults.export.heading_font_size,
            )?
            .set_default("export.line_height", defaults.export.line_height)?
            .set_default("export.snapshot_height", defaults.export.snapshot_height)?
            .set_default("export.background", defaults.export.background)?
            .set_default("export.text_color", defaults.export.text_color)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("fakecheck").required(false)),
        };

        // FAKECHECK__ANALYSIS__API_KEY style overrides
        let config = builder
            .add_source(Environment::with_prefix("FAKECHECK").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.apply_well_known_env();

        Ok(app_config)
    }

    /// Copy with API keys masked, for display
    pub fn redacted(&self) -> Self {
        let mask = |key: &str| {
            if key.is_empty() {
                String::new()
            } else {
                "********".to_string()
            }
        };
        let mut copy = self.clone();
        copy.analysis.api_key = mask(&self.analysis.api_key);
        copy.relay.api_key = mask(&self.relay.api_key);
        copy
    }

    /// Pick up provider keys from their conventional environment variables when unset
    fn apply_well_known_env(&mut self) {
        if self.analysis.api_key.is_empty() {
            let candidates: &[&str] = match self.analysis.provider {
                AnalysisProvider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
                AnalysisProvider::OpenAi => &["OPENAI_API_KEY"],
                AnalysisProvider::Mock => &[],
            };
            if let Some(key) = candidates
                .iter()
                .filter_map(|name| env::var(name).ok())
                .find(|value| !value.is_empty())
            {
                self.analysis.api_key = key;
            }
        }

        if self.relay.api_key.is_empty() {
            if let Ok(key) = env::var("FAKECHECK_API_KEY") {
                self.relay.api_key = key;
            }
        }
    }
}
