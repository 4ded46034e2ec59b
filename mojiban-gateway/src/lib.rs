pub mod commands;
pub mod render;
pub mod server;
pub mod state;
pub mod upload;

pub use commands::{CommandMatch, CommandRule, command_table};
pub use render::{RenderAssets, RenderError, render_png};
pub use server::create_router;
pub use state::AppState;
pub use upload::{UploadError, Uploader};
