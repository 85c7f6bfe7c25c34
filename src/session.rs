use crate::app::AppConfig;
use crate::contacts::ContactBook;
use crate::storage::History;
use thiserror::Error;

pub const DARK_MODE_LABEL: &str = "Toggle Dark Mode";
pub const LIGHT_MODE_LABEL: &str = "Toggle Light Mode";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Please enter both name and phone number")]
    Incomplete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
}

impl UserProfile {
    pub fn update(&mut self, name: &str, phone: &str) -> Result<(), ProfileError> {
        let (name, phone) = (name.trim(), phone.trim());
        if name.is_empty() || phone.is_empty() {
            return Err(ProfileError::Incomplete);
        }
        self.name = name.to_string();
        self.phone = phone.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dark_mode: bool,
    pub check_in_enabled: bool,
    pub check_in_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dark_mode: false, check_in_enabled: false, check_in_interval: 10 }
    }
}

impl Settings {
    /// Label for the theme button: it offers the mode we're not in.
    pub fn theme_label(&self) -> &'static str {
        if self.dark_mode { LIGHT_MODE_LABEL } else { DARK_MODE_LABEL }
    }

    pub fn toggle_dark_mode(&mut self) -> &'static str {
        self.dark_mode = !self.dark_mode;
        self.theme_label()
    }
}

/// Everything the window mutates. Lives on the GTK main thread.
pub struct Session {
    pub config: AppConfig,
    pub contacts: ContactBook,
    pub profile: UserProfile,
    pub settings: Settings,
    pub history: History,
}

impl Session {
    pub fn new(config: AppConfig) -> rusqlite::Result<Self> {
        let contacts = ContactBook::seeded(&config.safety.contacts);
        let settings = Settings {
            dark_mode: config.safety.dark_mode,
            check_in_interval: config.safety.check_in_interval_minutes,
            ..Settings::default()
        };
        Ok(Self {
            contacts,
            settings,
            profile: UserProfile::default(),
            history: History::open_in_memory()?,
            config,
        })
    }
}
