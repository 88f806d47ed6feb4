//! The image list artifact.
//!
//! `list` writes the converted directory's images as JSON; `sections` reads
//! them back. Reading drops repeated names and keeps the first occurrence, so
//! a hand-edited list with duplicates still renders each image once.
//!
//! ```json
//! {
//!   "images": [
//!     "fuji-view.jpg",
//!     "temple-gate.jpg"
//!   ]
//! }
//! ```

use crate::scan::{self, ScanError};
use crate::types::ImageList;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Filenames of every displayable image in `dir`, sorted.
pub fn build_image_list(dir: &Path) -> Result<ImageList, ListError> {
    let images = scan::list_images(dir)?
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    Ok(ImageList { images })
}

pub fn write_image_list(list: &ImageList, path: &Path) -> Result<(), ListError> {
    let json = serde_json::to_string_pretty(list)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn read_image_list(path: &Path) -> Result<ImageList, ListError> {
    let content = std::fs::read_to_string(path)?;
    let list: ImageList = serde_json::from_str(&content)?;
    Ok(dedup(list))
}

fn dedup(list: ImageList) -> ImageList {
    let mut seen = HashSet::new();
    let images = list
        .images
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect();
    ImageList { images }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::touch_files;
    use tempfile::TempDir;

    #[test]
    fn build_lists_images_only() {
        let tmp = TempDir::new().unwrap();
        touch_files(tmp.path(), &["b.jpg", "a.webp", "readme.md"]);
        let list = build_image_list(tmp.path()).unwrap();
        assert_eq!(list.images, vec!["a.webp", "b.jpg"]);
    }

    #[test]
    fn build_on_missing_dir_is_scan_error() {
        let result = build_image_list(Path::new("/nonexistent/converted"));
        assert!(matches!(
            result,
            Err(ListError::Scan(ScanError::MissingDirectory(_)))
        ));
    }

    #[test]
    fn written_list_reads_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("image_list.json");
        let list = ImageList {
            images: vec!["temple-gate.jpg".into(), "fuji-view.jpg".into()],
        };
        write_image_list(&list, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"images\""));
        assert!(content.contains('\n'), "expected pretty-printed JSON");
        assert_eq!(read_image_list(&path).unwrap(), list);
    }

    #[test]
    fn read_drops_duplicates_keeping_first() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("image_list.json");
        std::fs::write(
            &path,
            r#"{"images": ["b.jpg", "a.jpg", "b.jpg", "c.jpg", "a.jpg"]}"#,
        )
        .unwrap();
        let list = read_image_list(&path).unwrap();
        assert_eq!(list.images, vec!["b.jpg", "a.jpg", "c.jpg"]);
    }

    #[test]
    fn read_malformed_json_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("image_list.json");
        std::fs::write(&path, "[not json").unwrap();
        assert!(matches!(read_image_list(&path), Err(ListError::Json(_))));
    }
}
