//! Configuration management for mojiban.
//!
//! Non-sensitive settings live in a TOML file in the XDG config directory
//! (`~/.config/mojiban/config.toml`). A `.env` file is honored for the
//! handful of environment overrides (e.g. `MOJIBAN_CONFIG_DIR`).
//!
//! ```toml
//! [gateway]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [upload]
//! endpoint = "https://upload.gyazo.com/upload.cgi"
//!
//! [assets]
//! dir = "."
//!
//! [logging]
//! level = "info"
//! ```

mod settings;

pub use settings::{
    AssetSettings, GatewaySettings, LoggingSettings, Settings, SettingsError, UploadSettings,
};

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings loaded from the TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Upload endpoint '{0}' is not an http(s) URL")]
    InvalidUploadEndpoint(String),
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Loads `.env` if present, then the TOML settings file (creating it with
    /// defaults on first run), and validates the upload endpoint.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        let settings = Settings::load()?;
        Self::from_settings(settings)
    }

    /// Validate already-loaded settings.
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let endpoint = settings.upload.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidUploadEndpoint(
                settings.upload.endpoint.clone(),
            ));
        }
        Ok(Self { settings })
    }

    /// Get the HTTP bind address.
    pub fn bind_addr(&self) -> String {
        self.settings.bind_addr()
    }
}

/// Load .env file if it exists (for development convenience).
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        let config = Config::from_settings(Settings::default()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn rejects_non_http_upload_endpoint() {
        let mut settings = Settings::default();
        settings.upload.endpoint = "ftp://example.com/up".to_string();
        let err = Config::from_settings(settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUploadEndpoint(_)));
    }
}
