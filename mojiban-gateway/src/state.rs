//! Shared application state.

use std::time::Duration;

use tracing::warn;

use mojiban_core::Config;

use crate::commands::{CommandRule, command_table};
use crate::render::RenderAssets;
use crate::upload::{UploadError, Uploader};

/// Upper bound on the plain-text response body, in characters.
pub const RESPONSE_MAX_CHARS: usize = 1000;

/// Everything a request handler needs, built once at startup.
pub struct AppState {
    /// Active dispatch rules (sprite commands without their sprite are dropped)
    pub rules: Vec<CommandRule>,
    pub assets: RenderAssets,
    pub uploader: Uploader,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        let assets = RenderAssets::load(&config.settings.assets);

        let rules: Vec<CommandRule> = command_table()
            .into_iter()
            .filter(|rule| match rule.style.canvas.sprite_key() {
                Some(key) if !assets.has_sprite(key) => {
                    warn!(
                        "Command '!{}' disabled: sprite '{}' not loaded",
                        rule.name,
                        key.as_str()
                    );
                    false
                }
                _ => true,
            })
            .collect();

        let uploader = Uploader::new(
            config.settings.upload.endpoint.clone(),
            Duration::from_secs(config.settings.upload.timeout_seconds),
        )?;

        Ok(Self {
            rules,
            assets,
            uploader,
        })
    }
}
