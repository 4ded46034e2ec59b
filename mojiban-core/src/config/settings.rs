//! Settings loaded from the TOML configuration file.
//!
//! Located at `~/.config/mojiban/config.toml` (overridable with the
//! `MOJIBAN_CONFIG_DIR` environment variable). A default file is created on
//! first run.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# mojiban configuration file
# Located at: ~/.config/mojiban/config.toml

[gateway]
host = "127.0.0.1"
port = 3000

[upload]
# Gyazo-style image host: multipart POST, plain URL in the response body
endpoint = "https://upload.gyazo.com/upload.cgi"
timeout_seconds = 30

[assets]
# Fonts are read from <dir>/font, background sprites from <dir>/image
dir = "."
font_family = "IPAMonaGothic"
font_family_proportional = "IPAMonaPGothic"

[logging]
level = "info"
"#;

/// Settings loaded from the TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Gateway server configuration
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Image host upload configuration
    #[serde(default)]
    pub upload: UploadSettings,

    /// Font and sprite locations
    #[serde(default)]
    pub assets: AssetSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Gateway server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySettings {
    /// Host to bind to
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

/// Image host upload settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    /// Multipart upload endpoint
    #[serde(default = "default_upload_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_upload_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Asset locations and font families
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSettings {
    /// Base directory holding `font/` and `image/` subdirectories
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,

    /// Family name of the fixed-pitch font used by most commands
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Family name of the proportional variant (`!image_p`)
    #[serde(default = "default_font_family_proportional")]
    pub font_family_proportional: String,
}

impl AssetSettings {
    /// Directory scanned for font files.
    pub fn font_dir(&self) -> PathBuf {
        self.dir.join("font")
    }

    /// Directory holding background sprite PNGs.
    pub fn sprite_dir(&self) -> PathBuf {
        self.dir.join("image")
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}

fn default_upload_endpoint() -> String {
    "https://upload.gyazo.com/upload.cgi".to_string()
}

fn default_upload_timeout_seconds() -> u64 {
    30
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_font_family() -> String {
    "IPAMonaGothic".to_string()
}

fn default_font_family_proportional() -> String {
    "IPAMonaPGothic".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: default_upload_endpoint(),
            timeout_seconds: default_upload_timeout_seconds(),
        }
    }
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            font_family: default_font_family(),
            font_family_proportional: default_font_family_proportional(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Serialize settings to TOML content.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path.
    ///
    /// Uses the XDG config directory unless `MOJIBAN_CONFIG_DIR` is set.
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("MOJIBAN_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("mojiban");

        Ok(config_dir.join("config.toml"))
    }

    /// Create the default configuration file.
    fn create_default_config(path: &PathBuf) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Save settings to a specific file path.
    pub fn save_to_path(&self, path: &PathBuf) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the HTTP bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }
}
