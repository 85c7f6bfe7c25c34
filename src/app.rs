use adw::Application;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SAFETY_GTK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config encode: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub api_base: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base: "https://api.twilio.com".into(),
        }
    }
}

impl TwilioConfig {
    pub fn is_configured(&self) -> bool {
        !self.account_sid.trim().is_empty()
            && !self.auth_token.trim().is_empty()
            && !self.from_number.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self { endpoint: "https://ipinfo.io/json".into(), timeout_secs: 10 }
    }
}

impl LocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    pub dark_mode: bool,
    pub check_in_interval_minutes: u32,
    /// Numbers loaded into the contact list at startup.
    pub contacts: Vec<String>,
    pub nearby_services_url: String,
    pub help_center_url: String,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            check_in_interval_minutes: 10,
            contacts: Vec::new(),
            nearby_services_url: crate::panels::NEARBY_SERVICES_URL.into(),
            help_center_url: crate::panels::HELP_CENTER_URL.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub twilio: TwilioConfig,
    pub location: LocationConfig,
    pub safety: SafetyConfig,
}

impl AppConfig {
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("safety-gtk.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let mut cfg: AppConfig = toml::from_str(&text)?;
        cfg.normalize();
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        // holds the Twilio auth token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    /// Load the user's config. A missing file gets a default one written so
    /// credentials can be filled in; an unreadable one falls back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("{}; using defaults", ConfigError::NoConfigDir);
            return Self::default();
        };
        if !path.exists() {
            let cfg = Self::default();
            match cfg.save_to(&path) {
                Ok(()) => log::info!("Wrote default config to {}", path.display()),
                Err(e) => log::warn!("Could not write default config to {}: {e}", path.display()),
            }
            return cfg;
        }
        match Self::load_from(&path) {
            Ok(cfg) => {
                log::debug!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn normalize(&mut self) {
        use crate::utils::normalize_url;
        self.twilio.api_base = normalize_url(&self.twilio.api_base);
        self.location.endpoint = normalize_url(&self.location.endpoint);
        self.safety.nearby_services_url = normalize_url(&self.safety.nearby_services_url);
        self.safety.help_center_url = normalize_url(&self.safety.help_center_url);
    }
}

pub fn build_ui(app: &Application) {
    let config = AppConfig::load();
    if !config.twilio.is_configured() {
        log::warn!("Twilio credentials missing; SOS messages cannot be sent until they are configured");
    }
    match crate::session::Session::new(config) {
        Ok(session) => crate::ui::main_window::show_main_window(app, session),
        Err(e) => log::error!("Failed to open session history: {e}"),
    }
}
