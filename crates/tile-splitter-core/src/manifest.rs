use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::model::ImageDescriptor;

/// Text manifest file name written next to the tiles.
pub const MANIFEST_FILE: &str = "info.txt";
/// JSON manifest file name, written on request.
pub const MANIFEST_JSON_FILE: &str = "info.json";

/// Record of one finished split run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunManifest {
    pub source: PathBuf,
    pub image: ImageDescriptor,
    pub config: SplitConfig,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: usize,
    pub output_dir: PathBuf,
    /// Tile file names in row-major order.
    pub tiles: Vec<String>,
}

impl RunManifest {
    /// Renders the fixed, human-readable key:value layout of `info.txt`.
    pub fn to_text(&self) -> String {
        let mut s = String::new();
        // writing into a String cannot fail
        let _ = writeln!(s, "Source image:");
        let _ = writeln!(s, "  path: {}", self.source.display());
        let _ = writeln!(s, "  size: {}x{} px", self.image.width, self.image.height);
        let _ = writeln!(s, "  format: {}", self.image.format);
        let _ = writeln!(s, "  color mode: {}", self.image.color_mode);
        let _ = writeln!(s);
        let _ = writeln!(s, "Split parameters:");
        let _ = writeln!(s, "  rows: {}", self.config.rows);
        let _ = writeln!(s, "  cols: {}", self.config.cols);
        let _ = writeln!(s, "  overlap: {}", self.config.overlap);
        let _ = writeln!(s, "  keep aspect ratio: {}", self.config.keep_aspect_ratio);
        let _ = writeln!(s, "  tile size: {}x{} px", self.tile_width, self.tile_height);
        let _ = writeln!(s, "  tile count: {}", self.tile_count);
        s
    }

    /// Same record as JSON, with camelCase keys for tooling.
    pub fn to_json(&self) -> Value {
        json!({
            "source": self.source.to_string_lossy(),
            "image": {
                "width": self.image.width,
                "height": self.image.height,
                "format": self.image.format,
                "colorMode": self.image.color_mode,
            },
            "split": {
                "rows": self.config.rows,
                "cols": self.config.cols,
                "overlap": self.config.overlap,
                "keepAspectRatio": self.config.keep_aspect_ratio,
            },
            "tileSize": {"w": self.tile_width, "h": self.tile_height},
            "tileCount": self.tile_count,
            "tiles": self.tiles,
        })
    }

    /// Writes `info.txt` into `dir` and returns its path.
    pub fn write_text(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        fs::write(&path, self.to_text()).map_err(|e| SplitError::write_failure(&path, e))?;
        Ok(path)
    }

    /// Writes `info.json` into `dir` and returns its path.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_JSON_FILE);
        let body = serde_json::to_string_pretty(&self.to_json())?;
        fs::write(&path, body).map_err(|e| SplitError::write_failure(&path, e))?;
        Ok(path)
    }
}
