use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use log::LevelFilter;
use serde::Deserialize;
use timeline_engine::{EngineConfig, EntryPolicy, FetchSettings};

use super::logging::LogDestination;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TIMELINE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "timeline.ron";

const DEFAULT_SOURCES: [&str; 2] = [
    "https://cdn.ljskatt.no/ringeriksbanen/long.md",
    "https://cdn.ljskatt.no/ringeriksbanen/short.md",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub sources: Vec<String>,
    pub preferences_path: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub entry_policy: EntryPolicy,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Ringeriksbanen Tidslinje".to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            preferences_path: PathBuf::from("./.timeline_prefs.ron"),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            entry_policy: EntryPolicy::default(),
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
            allowed_content_types: settings.allowed_content_types,
        }
    }
}

impl AppConfig {
    /// `$TIMELINE_CONFIG` if set (must exist), else `./timeline.ron` if present,
    /// else the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        let config: AppConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.sources.iter().all(|s| s.trim().is_empty()) {
            bail!("config lists no document sources");
        }
        if self.fetch.max_bytes == 0 {
            bail!("fetch.max_bytes must be greater than zero");
        }
        if self.fetch.connect_timeout_secs == 0 || self.fetch.request_timeout_secs == 0 {
            bail!("fetch timeouts must be at least one second");
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("unknown log level {:?}", self.log_level))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
                redirect_limit: self.fetch.redirect_limit,
                max_bytes: self.fetch.max_bytes,
                allowed_content_types: self.fetch.allowed_content_types.clone(),
            },
            entry_policy: self.entry_policy,
        }
    }
}
