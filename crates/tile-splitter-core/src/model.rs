use image::{ColorType, DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

/// Read-only facts about the source image, captured once when it is opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    /// Container format (e.g. `PNG`), `Unknown` when not detectable.
    pub format: String,
    /// Pixel layout (e.g. `RGBA`), `Unknown` for unlisted color types.
    pub color_mode: String,
}

impl ImageDescriptor {
    pub fn from_image(img: &DynamicImage, format: Option<ImageFormat>) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            format: format_name(format),
            color_mode: color_mode_name(img.color()),
        }
    }
}

pub fn format_name(format: Option<ImageFormat>) -> String {
    match format {
        Some(f) => format!("{f:?}").to_ascii_uppercase(),
        None => "Unknown".to_string(),
    }
}

pub fn color_mode_name(color: ColorType) -> String {
    let s = match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "L16",
        ColorType::La16 => "LA16",
        ColorType::Rgb16 => "RGB16",
        ColorType::Rgba16 => "RGBA16",
        ColorType::Rgb32F => "RGB32F",
        ColorType::Rgba32F => "RGBA32F",
        _ => "Unknown",
    };
    s.to_string()
}

/// One planned cut. Edges are half-open: `left..right` x `top..bottom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileSpec {
    /// 0-based row index.
    pub row: u32,
    /// 0-based column index.
    pub col: u32,
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileSpec {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
    /// Output file name: `tile_<row+1:03>_<col+1:03>_<W>x<H>.png`.
    pub fn file_name(&self) -> String {
        format!(
            "tile_{:03}_{:03}_{}x{}.png",
            self.row + 1,
            self.col + 1,
            self.width(),
            self.height()
        )
    }
}

/// Nominal tile size plus the ordered (row-major) list of cuts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TilePlan {
    pub tile_width: u32,
    pub tile_height: u32,
    pub tiles: Vec<TileSpec>,
}

impl TilePlan {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    /// Sum of all tile areas; overlap strips are counted once per tile.
    pub fn total_area(&self) -> u64 {
        self.tiles.iter().map(TileSpec::area).sum()
    }
}
