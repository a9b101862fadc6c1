// App configuration: defaults overlaid with an embedded JSON block from index.html.
//
//   <script id="app-config" type="application/json">{ "api_base": "..." }</script>

use serde::Deserialize;
use thiserror::Error;
use web_sys::window;

pub const CONFIG_ELEMENT_ID: &str = "app-config";

const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_NOTICE_MS: u32 = 3500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing <script id=\"{CONFIG_ELEMENT_ID}\">")]
    Missing,
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Site-wide banner. Dismissal is remembered per id, so a new id shows again.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub log_level: String,
    /// How long a toast stays on screen.
    pub notice_ms: u32,
    pub announcement: Option<Announcement>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: option_env!("MARKETPLACE_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            notice_ms: DEFAULT_NOTICE_MS,
            announcement: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    api_base: Option<String>,
    log_level: Option<String>,
    notice_ms: Option<u32>,
    announcement: Option<Announcement>,
}

impl AppConfig {
    /// Applies whatever keys the JSON block sets on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overlay: ConfigOverlay = if json.trim().is_empty() {
            ConfigOverlay::default()
        } else {
            serde_json::from_str(json)?
        };
        let mut cfg = AppConfig::default();
        if let Some(base) = overlay.api_base.filter(|b| !b.trim().is_empty()) {
            cfg.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(level) = overlay.log_level.filter(|l| !l.trim().is_empty()) {
            cfg.log_level = level.trim().to_string();
        }
        if let Some(ms) = overlay.notice_ms {
            cfg.notice_ms = ms;
        }
        cfg.announcement = overlay
            .announcement
            .filter(|a| !a.id.trim().is_empty() && !a.text.trim().is_empty());
        Ok(cfg)
    }

    /// Reads the config block from the page. Falls back to defaults on any problem.
    pub fn load() -> Self {
        match read_config_block().and_then(|json| Self::from_json(&json)) {
            Ok(cfg) => cfg,
            Err(ConfigError::Missing) => AppConfig::default(),
            Err(e) => {
                // The subscriber is not up yet, so go straight to the console.
                gloo::console::warn!(format!("{e}; using default config"));
                AppConfig::default()
            }
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn read_config_block() -> Result<String, ConfigError> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(ConfigError::Missing)?;
    let el = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .ok_or(ConfigError::Missing)?;
    Ok(el.text_content().unwrap_or_default())
}
