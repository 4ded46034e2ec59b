//! Font and sprite loading.
//!
//! Fonts and sprites are loaded once at startup. Fonts go into the `usvg`
//! font database used for every rasterization; sprites are decoded for their
//! pixel dimensions and kept as base64 data URIs ready to embed into SVG.
//! A missing sprite only disables the commands that use it.

use std::collections::HashMap;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use resvg::usvg;
use tracing::{info, warn};

use mojiban_core::AssetSettings;

use super::style::{FontChoice, SpriteKey};

/// A background sprite ready for SVG embedding.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    /// `data:image/png;base64,...` href for an SVG `<image>` element.
    pub href: String,
}

/// Errors that can occur when loading a sprite file.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    Decode(#[from] image::ImageError),
}

impl Sprite {
    /// Load a sprite PNG from disk.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        let decoded = image::load_from_memory(&bytes)?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            href: format!("data:image/png;base64,{}", BASE64.encode(&bytes)),
        })
    }
}

/// Everything the renderers need that outlives a single request.
pub struct RenderAssets {
    options: usvg::Options<'static>,
    sprites: HashMap<SpriteKey, Sprite>,
    font_family: String,
    font_family_proportional: String,
}

impl RenderAssets {
    /// Load fonts and sprites according to the asset settings.
    ///
    /// Scanning the system font collection can block for a while, so call
    /// this from a blocking context at startup rather than lazily on the
    /// first request.
    pub fn load(settings: &AssetSettings) -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        let font_dir = settings.font_dir();
        if font_dir.is_dir() {
            options.fontdb_mut().load_fonts_dir(&font_dir);
            info!("Loaded fonts from {:?}", font_dir);
        } else {
            warn!(
                "Font directory {:?} not found, relying on system fonts",
                font_dir
            );
        }

        let mut sprites = HashMap::new();
        for key in SpriteKey::ALL {
            let path = settings.sprite_dir().join(format!("{}.png", key.as_str()));
            match Sprite::load(&path) {
                Ok(sprite) => {
                    sprites.insert(key, sprite);
                }
                Err(e) => {
                    warn!(
                        "Sprite {:?} unavailable ({}): '!{}' will be disabled",
                        path,
                        e,
                        key.as_str()
                    );
                }
            }
        }

        Self {
            options,
            sprites,
            font_family: settings.font_family.clone(),
            font_family_proportional: settings.font_family_proportional.clone(),
        }
    }

    /// SVG parsing options carrying the font database.
    pub fn options(&self) -> &usvg::Options<'static> {
        &self.options
    }

    pub fn sprite(&self, key: SpriteKey) -> Option<&Sprite> {
        self.sprites.get(&key)
    }

    pub fn has_sprite(&self, key: SpriteKey) -> bool {
        self.sprites.contains_key(&key)
    }

    /// The font family name for a style's font choice.
    pub fn family(&self, choice: FontChoice) -> &str {
        match choice {
            FontChoice::Regular => &self.font_family,
            FontChoice::Proportional => &self.font_family_proportional,
        }
    }

    /// Assets with no fonts or sprites loaded, plus the given sprite table.
    /// Test scaffolding only.
    #[cfg(test)]
    pub(crate) fn for_tests(sprites: HashMap<SpriteKey, Sprite>) -> Self {
        Self {
            options: usvg::Options::default(),
            sprites,
            font_family: "IPAMonaGothic".to_string(),
            font_family_proportional: "IPAMonaPGothic".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn sprite_load_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("komei.png");
        std::fs::write(&path, png_bytes(120, 84)).unwrap();

        let sprite = Sprite::load(&path).unwrap();
        assert_eq!((sprite.width, sprite.height), (120, 84));
        assert!(sprite.href.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn sprite_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(matches!(Sprite::load(&path), Err(AssetError::Decode(_))));
    }

    #[test]
    fn sprite_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        assert!(matches!(Sprite::load(&path), Err(AssetError::Io(_))));
    }

    #[test]
    fn load_without_assets_disables_all_sprites() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AssetSettings {
            dir: dir.path().to_path_buf(),
            ..AssetSettings::default()
        };
        let assets = RenderAssets::load(&settings);
        for key in SpriteKey::ALL {
            assert!(!assets.has_sprite(key));
        }
        assert_eq!(assets.family(FontChoice::Regular), "IPAMonaGothic");
    }

    #[test]
    fn load_picks_up_sprites_from_image_dir() {
        let dir = tempfile::tempdir().unwrap();
        let image_dir = dir.path().join("image");
        std::fs::create_dir_all(&image_dir).unwrap();
        std::fs::write(image_dir.join("yuno.png"), png_bytes(32, 24)).unwrap();

        let settings = AssetSettings {
            dir: dir.path().to_path_buf(),
            ..AssetSettings::default()
        };
        let assets = RenderAssets::load(&settings);
        assert!(assets.has_sprite(SpriteKey::Yuno));
        assert!(!assets.has_sprite(SpriteKey::Komei));
        assert_eq!(assets.sprite(SpriteKey::Yuno).unwrap().width, 32);
    }
}
