use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    /// File this config was loaded from; not serialized
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Local credential store: the session token and the display name shown
/// after login. Both survive restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// First column of the month grid: "sunday" or "monday"
    #[serde(default = "default_week_start")]
    pub week_start: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_week_start() -> String {
    "sunday".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            calendar: CalendarConfig::default(),
            path: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
        }
    }
}

impl CalendarConfig {
    pub fn week_start(&self) -> Result<Weekday> {
        match self.week_start.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sun),
            "monday" | "mon" => Ok(Weekday::Mon),
            other => Err(anyhow::anyhow!("Invalid calendar.week_start: {}", other)),
        }
    }
}

impl Config {
    /// Get config directory path (~/.muscle-log/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".muscle-log"))
    }

    /// Get config file path (~/.muscle-log/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from an explicit file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self {
                path: Some(path.to_path_buf()),
                ..Self::default()
            });
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Save configuration back to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        let config_file = match &self.path {
            Some(path) => path.clone(),
            None => Self::config_file()?,
        };

        if let Some(dir) = config_file.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Check if a session token is stored
    pub fn is_authenticated(&self) -> bool {
        !self.auth.token.is_empty()
    }

    /// Store credentials after login
    pub fn set_credentials(&mut self, token: String, display_name: String, email: String) {
        self.auth.token = token;
        self.auth.display_name = display_name;
        self.auth.email = email;
    }

    /// Forget the token only; used when the server reports it expired
    pub fn clear_token(&mut self) {
        self.auth.token.clear();
    }

    /// Forget everything stored at login
    pub fn clear_credentials(&mut self) {
        self.auth.token.clear();
        self.auth.display_name.clear();
        self.auth.email.clear();
    }
}
