use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};
use crate::model::ImageDescriptor;

/// Extensions treated as raster images when browsing for inputs.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

/// True if `p` has one of [`IMAGE_EXTENSIONS`] (case-insensitive).
pub fn is_image_path(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str())
    )
}

/// Opens and decodes `path`, sniffing the format from content when the
/// extension is missing or wrong.
pub fn open_image(path: &Path) -> Result<(DynamicImage, ImageDescriptor)> {
    let reader = guessed_reader(path)?;
    let format = reader.format();
    let img = reader.decode().map_err(|e| unreadable(path, e))?;
    let desc = ImageDescriptor::from_image(&img, format);
    Ok((img, desc))
}

/// Reads only the image header; format detection matches [`open_image`].
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    guessed_reader(path)?
        .into_dimensions()
        .map_err(|e| unreadable(path, e))
}

fn guessed_reader(path: &Path) -> Result<ImageReader<BufReader<File>>> {
    let reader = ImageReader::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SplitError::SourceNotFound(path.to_path_buf()),
        _ => unreadable(path, image::ImageError::IoError(e)),
    })?;
    reader
        .with_guessed_format()
        .map_err(|e| unreadable(path, image::ImageError::IoError(e)))
}

fn unreadable(path: &Path, source: image::ImageError) -> SplitError {
    SplitError::UnreadableImage {
        path: path.to_path_buf(),
        source,
    }
}

/// Summary shown before committing to a split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImagePreview {
    pub path: PathBuf,
    pub image: ImageDescriptor,
    pub file_size: u64,
}

impl ImagePreview {
    pub fn file_size_human(&self) -> String {
        format_file_size(self.file_size)
    }
}

pub fn preview_image(path: &Path) -> Result<ImagePreview> {
    let (_, image) = open_image(path)?;
    let file_size = fs::metadata(path)?.len();
    Ok(ImagePreview {
        path: path.to_path_buf(),
        image,
        file_size,
    })
}

/// Formats a byte count with one decimal in B/KB/MB/GB/TB (base 1024).
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0.0 B");
        assert_eq!(format_file_size(1023), "1023.0 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(2 * 1024u64.pow(4)), "2.0 TB");
    }

    #[test]
    fn image_extensions() {
        assert!(is_image_path(Path::new("a/emoji.PNG")));
        assert!(is_image_path(Path::new("sheet.webp")));
        assert!(is_image_path(Path::new("photo.jpeg")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("png")));
    }
}
