use tile_splitter_core::prelude::*;

fn bounds(t: &TileSpec) -> (u32, u32, u32, u32) {
    (t.left, t.top, t.right, t.bottom)
}

#[test]
fn interior_tiles_grow_by_twice_the_overlap() {
    let base = plan(100, 100, 2, 4, 0, false).expect("plan");
    let wide = plan(100, 100, 2, 4, 3, false).expect("plan");
    assert_eq!((wide.tile_width, wide.tile_height), (base.tile_width, base.tile_height));

    // columns 1 and 2 of the first row are interior horizontally
    for idx in [1usize, 2] {
        assert_eq!(wide.tiles[idx].width(), base.tiles[idx].width() + 6);
    }
    assert_eq!(bounds(&wide.tiles[1]), (22, 0, 53, 53));
}

#[test]
fn edge_tiles_are_clipped_not_shifted() {
    let plan = plan(100, 100, 2, 4, 3, false).expect("plan");
    assert_eq!(bounds(&plan.tiles[0]), (0, 0, 28, 53));
    assert_eq!(bounds(&plan.tiles[3]), (72, 0, 100, 53));
    assert_eq!(bounds(&plan.tiles[4]), (0, 47, 28, 100));
    assert_eq!(bounds(&plan.tiles[7]), (72, 47, 100, 100));
}

#[test]
fn single_row_ignores_vertical_overlap() {
    let plan = plan(120, 40, 1, 3, 10, false).expect("plan");
    for t in &plan.tiles {
        assert_eq!((t.top, t.bottom), (0, 40));
    }
}

#[test]
fn single_column_ignores_horizontal_overlap() {
    let plan = plan(100, 60, 3, 1, 5, false).expect("plan");
    for t in &plan.tiles {
        assert_eq!((t.left, t.right), (0, 100));
    }
    let rows: Vec<(u32, u32)> = plan.tiles.iter().map(|t| (t.top, t.bottom)).collect();
    assert_eq!(rows, vec![(0, 25), (15, 45), (35, 60)]);
}

#[test]
fn overlap_strips_account_for_extra_area() {
    // one row: every shared vertical edge contributes a 2k-wide strip counted twice
    let (width, height, cols, k) = (300u32, 50u32, 5i64, 4u32);
    let plan = plan(width, height, 1, cols, k as i64, false).expect("plan");
    let strips = (cols as u64 - 1) * 2 * k as u64 * height as u64;
    assert_eq!(plan.total_area() - strips, width as u64 * height as u64);
}

#[test]
fn overlap_larger_than_tile_is_still_clipped() {
    let plan = plan(30, 30, 3, 3, 100, false).expect("plan");
    for t in &plan.tiles {
        assert_eq!(bounds(t), (0, 0, 30, 30));
    }
}
