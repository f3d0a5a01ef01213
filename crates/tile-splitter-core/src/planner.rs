use tracing::instrument;

use crate::config::{Grid, SplitConfig};
use crate::error::{Result, SplitError};
use crate::model::{TilePlan, TileSpec};

/// Plans the crop rectangles for a `rows x cols` split of a `width x height` image.
///
/// Equivalent to [`plan_with`] on a config built from the loose arguments.
pub fn plan(
    width: u32,
    height: u32,
    rows: i64,
    cols: i64,
    overlap: i64,
    keep_aspect_ratio: bool,
) -> Result<TilePlan> {
    let cfg = SplitConfig {
        rows,
        cols,
        overlap,
        keep_aspect_ratio,
    };
    plan_with(width, height, &cfg)
}

#[instrument(level = "debug", skip(cfg), fields(rows = cfg.rows, cols = cfg.cols))]
/// Plans the crop rectangles for `cfg` over a `width x height` image.
///
/// Notes:
/// - Nominal tile size is `width / cols` by `height / rows` (floor).
/// - With `keep_aspect_ratio` the nominal height becomes `round(tile_width * height / width)`.
/// - Tiles on shared edges grow by `overlap` on each side; image edges clip instead of growing.
/// - The last column always ends at `width`. The last row ends at `height` unless
///   `keep_aspect_ratio` is set, in which case the bottom strip may stay uncovered.
/// - An axis with a single division spans the whole image and ignores `overlap`.
///
/// Errors: `InvalidParameter` for bad counts or overlap, `ImageTooSmall` when a
/// nominal dimension is below one pixel or an aspect-forced row falls outside the image.
pub fn plan_with(width: u32, height: u32, cfg: &SplitConfig) -> Result<TilePlan> {
    let Grid {
        rows,
        cols,
        overlap,
    } = cfg.grid()?;
    let too_small = || SplitError::ImageTooSmall {
        width,
        height,
        rows,
        cols,
    };
    if width == 0 || height == 0 {
        return Err(too_small());
    }

    let tile_width = width / cols;
    let mut tile_height = height / rows;
    if cfg.keep_aspect_ratio {
        let aspect = width as f64 / height as f64;
        tile_height = (tile_width as f64 / aspect).round() as u32;
    }
    if tile_width < 1 || tile_height < 1 {
        return Err(too_small());
    }

    let col_spans: Vec<(u32, u32)> = (0..cols)
        .map(|j| axis_span(j, cols, tile_width, overlap, width, true))
        .collect();
    let row_spans: Vec<(u32, u32)> = (0..rows)
        .map(|i| axis_span(i, rows, tile_height, overlap, height, !cfg.keep_aspect_ratio))
        .collect();
    if row_spans.iter().any(|(top, bottom)| top >= bottom) {
        return Err(too_small());
    }

    let mut tiles = Vec::with_capacity(rows as usize * cols as usize);
    for (i, &(top, bottom)) in row_spans.iter().enumerate() {
        for (j, &(left, right)) in col_spans.iter().enumerate() {
            tiles.push(TileSpec {
                row: i as u32,
                col: j as u32,
                left,
                top,
                right,
                bottom,
            });
        }
    }
    tracing::debug!(tile_width, tile_height, count = tiles.len(), "planned tiles");

    Ok(TilePlan {
        tile_width,
        tile_height,
        tiles,
    })
}

/// Start/end of division `index` along one axis, clipped to `0..extent`.
fn axis_span(
    index: u32,
    count: u32,
    nominal: u32,
    overlap: u32,
    extent: u32,
    last_reaches_edge: bool,
) -> (u32, u32) {
    if count == 1 {
        return (0, extent);
    }
    let extent = extent as u64;
    let nominal = nominal as u64;
    let overlap = overlap as u64;
    let index = index as u64;
    let start = (index * nominal).saturating_sub(overlap).min(extent);
    let end = if last_reaches_edge && index + 1 == count as u64 {
        extent
    } else {
        ((index + 1) * nominal + overlap).min(extent)
    };
    (start as u32, end as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_division_spans_whole_axis() {
        assert_eq!(axis_span(0, 1, 40, 7, 100, true), (0, 100));
    }

    #[test]
    fn first_and_last_spans_are_clipped() {
        assert_eq!(axis_span(0, 3, 33, 5, 100, true), (0, 38));
        assert_eq!(axis_span(1, 3, 33, 5, 100, true), (28, 71));
        assert_eq!(axis_span(2, 3, 33, 5, 100, true), (61, 100));
    }

    #[test]
    fn last_span_keeps_nominal_end_without_edge_rule() {
        assert_eq!(axis_span(2, 3, 30, 0, 100, false), (60, 90));
    }
}
