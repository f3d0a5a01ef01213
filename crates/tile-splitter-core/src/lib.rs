//! Core library for splitting an image into a grid of tiles.
//!
//! - Planner: `plan` / `plan_with` compute row-major crop rectangles with optional overlap
//! - Runner: `split_image` crops each rectangle, saves it as PNG and writes an `info.txt` manifest
//! - Data model is serde-serializable; the manifest can also be rendered as JSON.
//!
//! Quick example:
//! ```ignore
//! use tile_splitter_core::{SplitConfig, SplitRequest, split_image};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = SplitConfig::builder().grid(4, 3).overlap(2).build();
//! let report = split_image(&SplitRequest::new("emoji.png", cfg))?;
//! println!("tiles: {} in {}", report.tile_count(), report.output_dir.display());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod model;
pub mod pipeline;
pub mod planner;
pub mod source;

pub use config::*;
pub use error::*;
pub use manifest::*;
pub use model::*;
pub use pipeline::*;
pub use planner::*;
pub use source::*;

/// Convenience prelude for common types and functions.
/// Importing `tile_splitter_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{SplitConfig, SplitConfigBuilder};
    pub use crate::error::SplitError;
    pub use crate::manifest::RunManifest;
    pub use crate::model::{ImageDescriptor, TilePlan, TileSpec};
    pub use crate::pipeline::{SplitReport, SplitRequest};
    pub use crate::source::ImagePreview;
    pub use crate::{
        plan, plan_with, preview_image, read_dimensions, split_image, split_image_with_progress,
    };
}
