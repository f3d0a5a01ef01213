use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

/// Grid and overlap parameters for one split run.
///
/// Counts are signed so that negative user input reaches `validate` and is
/// reported as `InvalidParameter` rather than being rejected by a parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SplitConfig {
    /// Number of tile rows (vertical divisions).
    #[serde(default = "default_rows")]
    pub rows: i64,
    /// Number of tile columns (horizontal divisions).
    #[serde(default = "default_cols")]
    pub cols: i64,
    /// Extra pixels taken on each shared edge between neighbouring tiles.
    #[serde(default)]
    pub overlap: i64,
    /// Force the nominal tile height to the source image's aspect ratio.
    /// The bottom strip of the image may then be left uncovered.
    #[serde(default)]
    pub keep_aspect_ratio: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            overlap: 0,
            keep_aspect_ratio: false,
        }
    }
}

/// Validated grid parameters in pixel-space integer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Grid {
    pub rows: u32,
    pub cols: u32,
    pub overlap: u32,
}

impl SplitConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns `InvalidParameter` if:
    /// - `rows` or `cols` is below 1
    /// - `overlap` is negative
    /// - any value does not fit in `u32`
    pub fn validate(&self) -> Result<()> {
        self.grid().map(|_| ())
    }

    pub(crate) fn grid(&self) -> Result<Grid> {
        Ok(Grid {
            rows: count_param("rows", self.rows)?,
            cols: count_param("cols", self.cols)?,
            overlap: overlap_param(self.overlap)?,
        })
    }

    /// Total number of tiles this configuration produces (`rows * cols`).
    pub fn tile_count(&self) -> Result<u64> {
        let g = self.grid()?;
        Ok(g.rows as u64 * g.cols as u64)
    }

    /// Create a fluent builder for `SplitConfig`.
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::new()
    }
}

fn count_param(name: &'static str, v: i64) -> Result<u32> {
    if v <= 0 {
        return Err(SplitError::invalid(name, v, "must be at least 1"));
    }
    u32::try_from(v).map_err(|_| SplitError::invalid(name, v, "too large"))
}

fn overlap_param(v: i64) -> Result<u32> {
    if v < 0 {
        return Err(SplitError::invalid("overlap", v, "must not be negative"));
    }
    u32::try_from(v).map_err(|_| SplitError::invalid("overlap", v, "too large"))
}

fn default_rows() -> i64 {
    3
}
fn default_cols() -> i64 {
    3
}

/// Builder for `SplitConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SplitConfigBuilder {
    cfg: SplitConfig,
}

impl SplitConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SplitConfig::default(),
        }
    }
    pub fn grid(mut self, rows: i64, cols: i64) -> Self {
        self.cfg.rows = rows;
        self.cfg.cols = cols;
        self
    }
    pub fn rows(mut self, v: i64) -> Self {
        self.cfg.rows = v;
        self
    }
    pub fn cols(mut self, v: i64) -> Self {
        self.cfg.cols = v;
        self
    }
    pub fn overlap(mut self, v: i64) -> Self {
        self.cfg.overlap = v;
        self
    }
    pub fn keep_aspect_ratio(mut self, v: bool) -> Self {
        self.cfg.keep_aspect_ratio = v;
        self
    }
    pub fn build(self) -> SplitConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_by_three() {
        let cfg = SplitConfig::default();
        assert_eq!((cfg.rows, cfg.cols, cfg.overlap), (3, 3, 0));
        assert!(!cfg.keep_aspect_ratio);
        assert_eq!(cfg.tile_count().unwrap(), 9);
    }

    #[test]
    fn oversized_counts_are_rejected() {
        let cfg = SplitConfig::builder().rows(i64::from(u32::MAX) + 1).build();
        assert!(matches!(
            cfg.validate(),
            Err(SplitError::InvalidParameter { name: "rows", .. })
        ));
    }

    #[test]
    fn partial_input_uses_defaults() {
        let cfg: SplitConfig = serde_json::from_str(r#"{"cols": 5}"#).unwrap();
        assert_eq!(cfg.rows, 3);
        assert_eq!(cfg.cols, 5);
        assert_eq!(cfg.overlap, 0);
    }
}
