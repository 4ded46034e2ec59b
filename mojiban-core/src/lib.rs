pub mod config;
pub mod event;
pub mod width;

pub use config::{Config, ConfigError, load_dotenv};
pub use config::{
    AssetSettings, GatewaySettings, LoggingSettings, Settings, SettingsError, UploadSettings,
};
pub use event::{Event, EventBatch, Message};
pub use width::{rune_width, str_width};
