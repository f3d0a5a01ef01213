use tile_splitter_core::SplitError;
use tile_splitter_core::config::SplitConfig;
use tile_splitter_core::plan;

#[test]
fn zero_rows_is_invalid() {
    match plan(100, 100, 0, 2, 0, false) {
        Err(SplitError::InvalidParameter { name, .. }) => assert_eq!(name, "rows"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn negative_cols_is_invalid() {
    match plan(100, 100, 2, -1, 0, false) {
        Err(SplitError::InvalidParameter { name, value, .. }) => {
            assert_eq!(name, "cols");
            assert_eq!(value, "-1");
        }
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn negative_overlap_is_invalid() {
    match plan(100, 100, 2, 2, -5, false) {
        Err(SplitError::InvalidParameter { name, .. }) => assert_eq!(name, "overlap"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn narrower_than_cols_is_too_small() {
    match plan(5, 100, 2, 6, 0, false) {
        Err(SplitError::ImageTooSmall { width, cols, .. }) => {
            assert_eq!(width, 5);
            assert_eq!(cols, 6);
        }
        other => panic!("Expected ImageTooSmall, got {:?}", other),
    }
}

#[test]
fn shorter_than_rows_is_too_small() {
    assert!(matches!(
        plan(100, 3, 4, 1, 0, false),
        Err(SplitError::ImageTooSmall { .. })
    ));
}

#[test]
fn one_pixel_per_tile_is_allowed() {
    let plan = plan(4, 3, 3, 4, 0, false).expect("plan");
    assert_eq!((plan.tile_width, plan.tile_height), (1, 1));
    assert_eq!(plan.len(), 12);
}

#[test]
fn zero_sized_image_is_too_small() {
    assert!(matches!(
        plan(0, 10, 1, 1, 0, false),
        Err(SplitError::ImageTooSmall { .. })
    ));
}

#[test]
fn validate_reports_the_first_bad_field() {
    let cfg = SplitConfig::builder().grid(0, -3).overlap(-1).build();
    assert!(matches!(
        cfg.validate(),
        Err(SplitError::InvalidParameter { name: "rows", .. })
    ));
    let cfg = SplitConfig::builder().grid(2, 2).overlap(-1).build();
    assert!(matches!(
        cfg.validate(),
        Err(SplitError::InvalidParameter { name: "overlap", .. })
    ));
    assert!(SplitConfig::builder().grid(2, 2).overlap(0).build().validate().is_ok());
}
