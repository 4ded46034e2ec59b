//! Style vocabulary for the image renderers.
//!
//! Every command renders through the same SVG pipeline; a [`Style`] captures
//! the only things that differ between them: canvas shape, background sprite,
//! font, ink color and cursor placement.

/// Per-cell horizontal advance used when sizing text-fit canvases.
pub const CELL_PX: usize = 11;

/// Baseline-to-baseline advance shared by most commands (11px cells × 1.8).
pub const LINE_ADVANCE: f32 = 19.8;

/// Which of the two configured font families to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    /// Fixed-pitch family; the cell-grid layout math assumes this one.
    Regular,
    /// Proportional variant used by `!image_p`.
    Proportional,
}

/// Text fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Black,
    White,
}

impl Ink {
    pub fn fill(self) -> &'static str {
        match self {
            Ink::Black => "#000000",
            Ink::White => "#FFFFFF",
        }
    }
}

/// Direction the text flows across the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Lines drawn left-to-right, stacked downward.
    Horizontal,
    /// Glyphs stacked downward, columns advancing right-to-left.
    Vertical,
}

/// Background sprites shipped with the bot, keyed by file stem
/// (`<assets>/image/<stem>.png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Komei,
    Yuno,
    Deris,
    Golgo,
    Seikai,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 5] = [
        SpriteKey::Komei,
        SpriteKey::Yuno,
        SpriteKey::Deris,
        SpriteKey::Golgo,
        SpriteKey::Seikai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpriteKey::Komei => "komei",
            SpriteKey::Yuno => "yuno",
            SpriteKey::Deris => "deris",
            SpriteKey::Golgo => "golgo",
            SpriteKey::Seikai => "seikai",
        }
    }
}

/// How the canvas is shaped and what sits behind the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canvas {
    /// White canvas sized from the measured text
    /// (width = cells × [`CELL_PX`] + 70, height = lines × 20 + 20).
    FitText,
    /// Canvas is exactly the sprite bitmap.
    Sprite(SpriteKey),
    /// Speech bubble: text-sized white canvas (min width 200), the sprite
    /// drawn at the origin and a 1px black frame around the whole thing.
    Bubble(SpriteKey),
}

impl Canvas {
    /// The sprite this canvas needs, if any.
    pub fn sprite_key(self) -> Option<SpriteKey> {
        match self {
            Canvas::FitText => None,
            Canvas::Sprite(key) | Canvas::Bubble(key) => Some(key),
        }
    }
}

/// Where the first baseline starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Fixed offset from the top-left corner; `y` is the first baseline.
    TopLeft { x: f32, y: f32 },
    /// `x` measured in from the right edge (vertical flows start top-right).
    TopRight { inset: f32, y: f32 },
    /// Baseline measured up from the bottom edge.
    BottomLeft { x: f32, inset: f32 },
}

/// Complete description of one command's rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub font: FontChoice,
    pub font_size: f32,
    pub ink: Ink,
    pub flow: Flow,
    pub canvas: Canvas,
    pub anchor: Anchor,
    /// Baseline advance between lines (horizontal flow), or between glyphs
    /// and columns (vertical flow).
    pub advance: f32,
}
