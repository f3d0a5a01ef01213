use image::{GrayImage, Luma};
use tile_splitter_core::prelude::*;

#[test]
fn preview_reports_format_mode_and_size() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("gray.png");
    GrayImage::from_pixel(17, 9, Luma([128])).save(&path).expect("save");

    let p = preview_image(&path).expect("preview");
    assert_eq!((p.image.width, p.image.height), (17, 9));
    assert_eq!(p.image.format, "PNG");
    assert_eq!(p.image.color_mode, "L");
    assert_eq!(p.file_size, std::fs::metadata(&path).expect("meta").len());
    assert!(p.file_size_human().ends_with(" B"));
}

#[test]
fn format_is_sniffed_from_content() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let png = tmp.path().join("real.png");
    GrayImage::new(4, 4).save(&png).expect("save");
    let renamed = tmp.path().join("mislabelled.dat");
    std::fs::rename(&png, &renamed).expect("rename");

    let p = preview_image(&renamed).expect("preview");
    assert_eq!(p.image.format, "PNG");
}

#[test]
fn preview_of_missing_file_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        preview_image(&tmp.path().join("missing.gif")),
        Err(SplitError::SourceNotFound(_))
    ));
}

#[test]
fn dimensions_use_content_sniffing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let png = tmp.path().join("sheet.png");
    GrayImage::new(12, 7).save(&png).expect("save");
    let renamed = tmp.path().join("sheet.dat");
    std::fs::rename(&png, &renamed).expect("rename");

    assert_eq!(read_dimensions(&renamed).expect("dimensions"), (12, 7));
}

#[test]
fn dimensions_of_missing_and_bogus_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        read_dimensions(&tmp.path().join("gone.png")),
        Err(SplitError::SourceNotFound(_))
    ));
    let bogus = tmp.path().join("bogus.png");
    std::fs::write(&bogus, b"not an image").expect("write");
    assert!(matches!(
        read_dimensions(&bogus),
        Err(SplitError::UnreadableImage { .. })
    ));
}
