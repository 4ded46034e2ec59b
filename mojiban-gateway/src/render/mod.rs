//! SVG-based text-to-PNG renderers.
//!
//! Every command renders the same way: build an SVG string (white or sprite
//! background plus positioned `<text>` elements) and rasterize it via resvg.
//! The layout runs on a fixed-pitch cell grid measured with
//! [`mojiban_core::width::str_width`], so double-width CJK text sizes the
//! canvas correctly.

use std::fmt::Write;

use resvg::tiny_skia;
use resvg::usvg;

use mojiban_core::width::str_width;

pub mod assets;
pub mod style;

pub use assets::{AssetError, RenderAssets, Sprite};
pub use style::{Anchor, Canvas, Flow, FontChoice, Ink, SpriteKey, Style};

use style::CELL_PX;

// FitText canvas: per-line height and padding around the text block.
const FIT_LINE_H: usize = 20;
const FIT_PAD_W: usize = 70;
const FIT_PAD_H: usize = 20;

// Bubble canvas: wider padding for the sprite, enforced minimum width.
const BUBBLE_LINE_H: usize = 21;
const BUBBLE_PAD_W: usize = 80;
const BUBBLE_PAD_H: usize = 50;
const BUBBLE_MIN_W: usize = 200;

// Canvas palette
const CANVAS_BG: &str = "#FFFFFF";
const FRAME_COLOR: &str = "#000000";

/// Errors that can occur while rendering a command image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("sprite '{0}' is not loaded")]
    SpriteMissing(&'static str),

    #[error("SVG parse: {0}")]
    Svg(#[from] usvg::Error),

    #[error("pixmap allocation failed ({width}x{height})")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("PNG encode: {0}")]
    PngEncode(String),
}

/// Render the given text lines with a command's style to PNG bytes.
pub fn render_png(
    assets: &RenderAssets,
    style: &Style,
    lines: &[String],
) -> Result<Vec<u8>, RenderError> {
    let svg = build_svg(assets, style, lines)?;
    rasterize(&svg, assets.options())
}

/// Widest line in cells.
fn max_line_cells(lines: &[String]) -> usize {
    lines.iter().map(|l| str_width(l)).max().unwrap_or(0)
}

/// Canvas size in pixels for a style applied to the given lines.
fn canvas_size(
    assets: &RenderAssets,
    style: &Style,
    lines: &[String],
) -> Result<(f32, f32), RenderError> {
    let size = match style.canvas {
        Canvas::FitText => (
            (max_line_cells(lines) * CELL_PX + FIT_PAD_W) as f32,
            (lines.len() * FIT_LINE_H + FIT_PAD_H) as f32,
        ),
        Canvas::Sprite(key) => {
            let sprite = require_sprite(assets, key)?;
            (sprite.width as f32, sprite.height as f32)
        }
        Canvas::Bubble(_) => (
            (max_line_cells(lines) * CELL_PX + BUBBLE_PAD_W).max(BUBBLE_MIN_W) as f32,
            (lines.len() * BUBBLE_LINE_H + BUBBLE_PAD_H) as f32,
        ),
    };
    Ok(size)
}

fn require_sprite(assets: &RenderAssets, key: SpriteKey) -> Result<&Sprite, RenderError> {
    assets
        .sprite(key)
        .ok_or(RenderError::SpriteMissing(key.as_str()))
}

fn build_svg(assets: &RenderAssets, style: &Style, lines: &[String]) -> Result<String, RenderError> {
    let (w, h) = canvas_size(assets, style, lines)?;

    let mut s = String::with_capacity(2048);
    let _ = write!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
    );

    // Background
    match style.canvas {
        Canvas::FitText => {
            let _ = write!(s, r#"<rect width="{w}" height="{h}" fill="{CANVAS_BG}"/>"#);
        }
        Canvas::Sprite(key) => {
            let sprite = require_sprite(assets, key)?;
            let _ = write!(
                s,
                r#"<image href="{}" x="0" y="0" width="{}" height="{}"/>"#,
                sprite.href, sprite.width, sprite.height
            );
        }
        Canvas::Bubble(key) => {
            let sprite = require_sprite(assets, key)?;
            let _ = write!(s, r#"<rect width="{w}" height="{h}" fill="{CANVAS_BG}"/>"#);
            let _ = write!(
                s,
                r#"<image href="{}" x="0" y="0" width="{}" height="{}"/>"#,
                sprite.href, sprite.width, sprite.height
            );
            let _ = write!(
                s,
                r#"<rect x="0.5" y="0.5" width="{}" height="{}" fill="none" stroke="{FRAME_COLOR}" stroke-width="1"/>"#,
                w - 1.0,
                h - 1.0
            );
        }
    }

    // Text
    let (x0, y0) = match style.anchor {
        Anchor::TopLeft { x, y } => (x, y),
        Anchor::TopRight { inset, y } => (w - inset, y),
        Anchor::BottomLeft { x, inset } => (x, h - inset),
    };
    let family = assets.family(style.font);
    let fill = style.ink.fill();
    let size = style.font_size;

    match style.flow {
        Flow::Horizontal => {
            let mut y = y0;
            for line in lines {
                let escaped = xml_escape(line);
                let _ = write!(
                    s,
                    r#"<text x="{x0}" y="{y}" font-family="{family}" font-size="{size}" fill="{fill}">{escaped}</text>"#,
                );
                y += style.advance;
            }
        }
        Flow::Vertical => {
            // Columns run right-to-left, one glyph per baseline.
            let mut x = x0;
            for line in lines {
                let mut y = y0;
                for glyph in line.chars() {
                    let escaped = xml_escape(&glyph.to_string());
                    let _ = write!(
                        s,
                        r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="{fill}">{escaped}</text>"#,
                    );
                    y += style.advance;
                }
                x -= style.advance;
            }
        }
    }

    s.push_str("</svg>");
    Ok(s)
}

fn rasterize(svg_str: &str, options: &usvg::Options) -> Result<Vec<u8>, RenderError> {
    let tree = usvg::Tree::from_data(svg_str.as_bytes(), options)?;

    let size = tree.size().to_int_size();
    let mut pixmap =
        tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(RenderError::PixmapAlloc {
            width: size.width(),
            height: size.height(),
        })?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RenderError::PngEncode(e.to_string()))
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
