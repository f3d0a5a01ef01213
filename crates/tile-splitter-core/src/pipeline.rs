use std::fs;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::manifest::RunManifest;
use crate::model::{TilePlan, TileSpec};
use crate::planner::plan_with;
use crate::source::open_image;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What to split and where the tiles go.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub source: PathBuf,
    /// Defaults to [`default_output_dir`] when `None`.
    pub output_dir: Option<PathBuf>,
    pub config: SplitConfig,
    /// Also write `info.json` next to `info.txt`.
    pub write_json: bool,
}

impl SplitRequest {
    pub fn new(source: impl Into<PathBuf>, config: SplitConfig) -> Self {
        Self {
            source: source.into(),
            output_dir: None,
            config,
            write_json: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_json_manifest(mut self, v: bool) -> Self {
        self.write_json = v;
        self
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir(&self.source, self.config.rows, self.config.cols),
        }
    }
}

/// `<source dir>/<basename>_split_<rows>x<cols>`.
pub fn default_output_dir(source: &Path, rows: i64, cols: i64) -> PathBuf {
    let base_dir = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    base_dir.join(format!("{stem}_split_{rows}x{cols}"))
}

/// Result of a finished split run.
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub json_manifest_path: Option<PathBuf>,
    pub manifest: RunManifest,
    /// Saved tile paths in row-major order.
    pub files: Vec<PathBuf>,
}

impl SplitReport {
    pub fn tile_count(&self) -> usize {
        self.files.len()
    }
}

/// Splits the source image into tiles, writes them as PNG and writes the manifest.
///
/// Notes:
/// - Any tile save failure aborts the run with `OutputWriteFailure`; tiles already
///   written stay on disk and no manifest is written.
/// - With the `parallel` feature tiles are exported concurrently; names and the
///   reported count do not depend on execution order.
pub fn split_image(req: &SplitRequest) -> Result<SplitReport> {
    split_image_with_hooks(req, |_, _| {}, |_| {})
}

/// Like [`split_image`], calling `on_tile` after each tile is saved.
pub fn split_image_with_progress<F>(req: &SplitRequest, on_tile: F) -> Result<SplitReport>
where
    F: Fn(&TileSpec, &Path) + Sync,
{
    split_image_with_hooks(req, on_tile, |_| {})
}

#[instrument(skip_all, fields(source = %req.source.display()))]
/// Like [`split_image_with_progress`], then runs `after` on the finished report.
/// `after` is not called when the run fails.
pub fn split_image_with_hooks<F, H>(req: &SplitRequest, on_tile: F, after: H) -> Result<SplitReport>
where
    F: Fn(&TileSpec, &Path) + Sync,
    H: FnOnce(&SplitReport),
{
    // missing source is reported ahead of parameter errors
    if !req.source.exists() {
        return Err(SplitError::SourceNotFound(req.source.clone()));
    }
    req.config.validate()?;

    let (img, desc) = open_image(&req.source)?;
    info!(
        width = desc.width,
        height = desc.height,
        format = %desc.format,
        "opened source image"
    );
    let plan = plan_with(desc.width, desc.height, &req.config)?;
    info!(
        rows = req.config.rows,
        cols = req.config.cols,
        overlap = req.config.overlap,
        tile_width = plan.tile_width,
        tile_height = plan.tile_height,
        "planned split"
    );

    let output_dir = req.resolved_output_dir();
    fs::create_dir_all(&output_dir).map_err(|e| SplitError::write_failure(&output_dir, e))?;

    let files = export_tiles(&img, &plan, &output_dir, &on_tile)?;

    let manifest = RunManifest {
        source: req.source.clone(),
        image: desc,
        config: req.config.clone(),
        tile_width: plan.tile_width,
        tile_height: plan.tile_height,
        tile_count: files.len(),
        output_dir: output_dir.clone(),
        tiles: plan.tiles.iter().map(TileSpec::file_name).collect(),
    };
    let manifest_path = manifest.write_text(&output_dir)?;
    let json_manifest_path = if req.write_json {
        Some(manifest.write_json(&output_dir)?)
    } else {
        None
    };
    info!(count = files.len(), ?output_dir, "split finished");

    let report = SplitReport {
        output_dir,
        manifest_path,
        json_manifest_path,
        manifest,
        files,
    };
    after(&report);
    Ok(report)
}

#[cfg(not(feature = "parallel"))]
fn export_tiles<F>(img: &DynamicImage, plan: &TilePlan, dir: &Path, on_tile: &F) -> Result<Vec<PathBuf>>
where
    F: Fn(&TileSpec, &Path) + Sync,
{
    let mut files = Vec::with_capacity(plan.len());
    for tile in &plan.tiles {
        let path = save_tile(img, tile, dir)?;
        on_tile(tile, &path);
        files.push(path);
    }
    Ok(files)
}

#[cfg(feature = "parallel")]
fn export_tiles<F>(img: &DynamicImage, plan: &TilePlan, dir: &Path, on_tile: &F) -> Result<Vec<PathBuf>>
where
    F: Fn(&TileSpec, &Path) + Sync,
{
    plan.tiles
        .par_iter()
        .map(|tile| {
            let path = save_tile(img, tile, dir)?;
            on_tile(tile, &path);
            Ok(path)
        })
        .collect()
}

fn save_tile(img: &DynamicImage, tile: &TileSpec, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(tile.file_name());
    let cropped = png_compatible(img.crop_imm(tile.left, tile.top, tile.width(), tile.height()));
    cropped
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| SplitError::write_failure(&path, e))?;
    debug!(?path, row = tile.row, col = tile.col, "saved tile");
    Ok(path)
}

// PNG has no float samples.
fn png_compatible(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba16(img.to_rgba16()),
        _ => img,
    }
}
