//! Font resolution and text rasterization.
//!
//! Fonts are picked once per batch from a ranked list of tiers. The first
//! tier whose font file can be found and parsed wins; the last tier is the
//! built-in bitmap face and always succeeds. The chosen [`FontTier`] is part
//! of the render report so a degraded run is visible.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use serde::Serialize;

use super::glyphs::{self, GLYPH_ADVANCE};

/// Environment variable naming an extra directory to search for fonts.
pub const FONT_DIR_ENV: &str = "STICKERPRESS_FONT_DIR";

/// Directories searched after the override directory and the working
/// directory.
const SYSTEM_FONT_DIRS: [&str; 9] = [
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:/Windows/Fonts",
];

/// The rank of the font provider used for a batch, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontTier {
    /// DejaVu Sans Mono at 90 px / 45 px.
    PreferredMono,
    /// DejaVu Sans at 72 px / 32 px.
    Fallback,
    /// The embedded 5×7 bitmap face.
    Builtin,
}

impl FontTier {
    /// All tiers in the order they are tried.
    pub const RANKED: [FontTier; 3] = [FontTier::PreferredMono, FontTier::Fallback, FontTier::Builtin];

    /// Font file this tier loads, if any.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            FontTier::PreferredMono => Some("DejaVuSansMono.ttf"),
            FontTier::Fallback => Some("DejaVuSans.ttf"),
            FontTier::Builtin => None,
        }
    }

    /// Pixel sizes of the large and small text for outline tiers.
    fn outline_sizes(self) -> (f32, f32) {
        match self {
            FontTier::PreferredMono => (90.0, 45.0),
            FontTier::Fallback => (72.0, 32.0),
            FontTier::Builtin => (0.0, 0.0),
        }
    }

    /// True for every tier below the preferred one.
    pub fn is_degraded(self) -> bool {
        self != FontTier::PreferredMono
    }
}

impl fmt::Display for FontTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontTier::PreferredMono => write!(f, "DejaVu Sans Mono"),
            FontTier::Fallback => write!(f, "DejaVu Sans"),
            FontTier::Builtin => write!(f, "built-in bitmap font (may not look as good)"),
        }
    }
}

/// Where to look for font files.
#[derive(Clone, Debug, Default)]
pub struct FontSearch {
    /// Directories searched in order.
    pub dirs: Vec<PathBuf>,
}

impl FontSearch {
    /// Search path for the command line tool: the override directory (if
    /// given), the working directory, then the common system directories.
    pub fn standard(override_dir: Option<&Path>) -> Self {
        let mut dirs = Vec::new();
        if let Some(dir) = override_dir {
            dirs.push(dir.to_path_buf());
        }
        dirs.push(PathBuf::from("."));
        dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
        Self { dirs }
    }

    /// A search path that finds nothing, which forces the built-in face.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the first existing file called `file_name` in the search path.
    pub fn locate(&self, file_name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }
}

/// Ink bounds of a rendered string relative to its pen origin.
///
/// The pen origin is the top-left corner of the line box: x at the start of
/// the first glyph, y at the font's ascent line. An empty or blank string
/// has an empty box at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    fn union(self, other: TextBox) -> TextBox {
        TextBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// A face at a fixed size that can measure and draw single-line text.
#[derive(Clone)]
pub enum Typeface {
    /// A TrueType font at a pixel size.
    Outline { font: Font<'static>, px: f32 },
    /// The built-in bitmap face, each font unit drawn as `scale` pixels.
    Bitmap { scale: u32 },
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Outline { px, .. } => f.debug_struct("Outline").field("px", px).finish(),
            Typeface::Bitmap { scale } => f.debug_struct("Bitmap").field("scale", scale).finish(),
        }
    }
}

impl Typeface {
    /// Measures the ink bounds of `text`.
    pub fn measure(&self, text: &str) -> TextBox {
        match self {
            Typeface::Outline { font, px } => {
                let scale = Scale::uniform(*px);
                let ascent = font.v_metrics(scale).ascent;
                font.layout(text, scale, point(0.0, ascent))
                    .filter_map(|g| g.pixel_bounding_box())
                    .map(|bb| TextBox {
                        left: bb.min.x,
                        top: bb.min.y,
                        right: bb.max.x,
                        bottom: bb.max.y,
                    })
                    .reduce(TextBox::union)
                    .unwrap_or_default()
            }
            Typeface::Bitmap { scale } => {
                let s = *scale as i32;
                text.chars()
                    .enumerate()
                    .flat_map(|(i, ch)| {
                        let pen = (i as u32 * GLYPH_ADVANCE) as i32;
                        glyphs::lit_cells(ch).map(move |(col, row)| TextBox {
                            left: (pen + col as i32) * s,
                            top: row as i32 * s,
                            right: (pen + col as i32 + 1) * s,
                            bottom: (row as i32 + 1) * s,
                        })
                    })
                    .reduce(TextBox::union)
                    .unwrap_or_default()
            }
        }
    }

    /// Draws `text` in black so that its ink box's top-left corner lands at
    /// `(x, y)` on `canvas`. Pixels outside the canvas are clipped.
    ///
    /// `ink` must be the result of [`Typeface::measure`] for the same text.
    pub fn draw(&self, canvas: &mut RgbImage, x: i64, y: i64, text: &str, ink: &TextBox) {
        let origin_x = x - ink.left as i64;
        let origin_y = y - ink.top as i64;

        match self {
            Typeface::Outline { font, px } => {
                let scale = Scale::uniform(*px);
                let ascent = font.v_metrics(scale).ascent;
                let start = point(origin_x as f32, origin_y as f32 + ascent);
                for glyph in font.layout(text, scale, start) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        blend_black(
                            canvas,
                            bb.min.x as i64 + gx as i64,
                            bb.min.y as i64 + gy as i64,
                            coverage,
                        );
                    });
                }
            }
            Typeface::Bitmap { scale } => {
                let s = *scale as i64;
                for (i, ch) in text.chars().enumerate() {
                    let pen = origin_x + (i as u32 * GLYPH_ADVANCE) as i64 * s;
                    for (col, row) in glyphs::lit_cells(ch) {
                        for dy in 0..s {
                            for dx in 0..s {
                                blend_black(
                                    canvas,
                                    pen + col as i64 * s + dx,
                                    origin_y + row as i64 * s + dy,
                                    1.0,
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}

fn blend_black(canvas: &mut RgbImage, x: i64, y: i64, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage == 0.0 {
        return;
    }
    let Rgb(px) = canvas.get_pixel_mut(x as u32, y as u32);
    for channel in px.iter_mut() {
        *channel = (*channel as f32 * (1.0 - coverage)).round() as u8;
    }
}

/// The pair of faces used for one batch.
#[derive(Clone, Debug)]
pub struct FontSet {
    /// Which provider supplied the faces.
    pub tier: FontTier,
    /// Where the font was loaded from (None for the built-in face).
    pub source: Option<PathBuf>,
    /// Face for the first name.
    pub large: Typeface,
    /// Face for the last name.
    pub small: Typeface,
}

impl FontSet {
    /// The built-in bitmap faces (large scale 10, small scale 5).
    pub fn builtin() -> Self {
        Self {
            tier: FontTier::Builtin,
            source: None,
            large: Typeface::Bitmap { scale: 10 },
            small: Typeface::Bitmap { scale: 5 },
        }
    }

    /// Tries the tiers in rank order and returns the first that loads.
    pub fn resolve(search: &FontSearch) -> Self {
        for tier in FontTier::RANKED {
            if let Some(set) = Self::load_tier(tier, search) {
                if tier.is_degraded() {
                    tracing::warn!("Using {} for sticker text", tier);
                } else {
                    tracing::info!("Using {} font", tier);
                }
                return set;
            }
        }
        Self::builtin()
    }

    /// Loads one tier, or returns None if its font is unavailable.
    pub fn load_tier(tier: FontTier, search: &FontSearch) -> Option<Self> {
        let Some(file_name) = tier.file_name() else {
            return Some(Self::builtin());
        };

        let path = search.locate(file_name)?;
        let font = match load_font_file(&path) {
            Ok(font) => font,
            Err(message) => {
                tracing::debug!("Skipping font {}: {}", path.display(), message);
                return None;
            }
        };

        let (large_px, small_px) = tier.outline_sizes();
        Some(Self {
            tier,
            source: Some(path),
            large: Typeface::Outline {
                font: font.clone(),
                px: large_px,
            },
            small: Typeface::Outline {
                font,
                px: small_px,
            },
        })
    }
}

fn load_font_file(path: &Path) -> Result<Font<'static>, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    Font::try_from_vec(bytes).ok_or_else(|| "not a valid TrueType font".to_string())
}
