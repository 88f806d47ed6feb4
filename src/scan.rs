//! Directory listing.
//!
//! Every command starts here: list one directory (never recursively), keep the
//! files whose extension is on an allow-list, and sort them by filename. The
//! order of the result is the order images appear in every generated artifact.
//!
//! ```text
//! assets/images/gallery/converted/
//! ├── fuji-view.jpg        ← listed
//! ├── Narita-Gate.PNG      ← listed (extension match ignores case)
//! ├── notes.txt            ← skipped
//! └── old/                 ← skipped (directories are never entered)
//!     └── temple-gate.jpg
//! ```

use crate::naming;
use crate::types::ImageRef;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions the gallery displays.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Files directly inside `dir` with one of `extensions`, sorted by filename.
///
/// A missing directory is an error; an empty result is not.
pub fn list_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(dir = %dir.display(), count = files.len(), "listed directory");
    Ok(files)
}

/// Displayable images in `dir`.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    list_with_extensions(dir, IMAGE_EXTENSIONS)
}

/// Images in `dir` as renderer input. Link paths are `dir/filename` with
/// forward slashes, exactly as `dir` was given.
pub fn image_refs(dir: &Path) -> Result<Vec<ImageRef>, ScanError> {
    let prefix = naming::posix_path(dir);
    let prefix = prefix.trim_end_matches('/');
    Ok(list_images(dir)?
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .map(|name| {
            if prefix.is_empty() {
                ImageRef::new(&name)
            } else {
                ImageRef::new(&format!("{prefix}/{name}"))
            }
        })
        .collect())
}

/// Image format, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl ImageKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Jpeg => "JPG",
            Self::Png => "PNG",
            Self::WebP => "WEBP",
            Self::Gif => "GIF",
        };
        f.write_str(label)
    }
}

/// Per-format tally of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountSummary {
    /// Filenames, sorted.
    pub files: Vec<String>,
    pub counts: BTreeMap<ImageKind, usize>,
}

impl CountSummary {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn count(&self, kind: ImageKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Files that are not JPEG, in listing order.
    pub fn non_jpeg(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|f| ImageKind::from_path(Path::new(f)) != Some(ImageKind::Jpeg))
    }
}

pub fn count_images(dir: &Path) -> Result<CountSummary, ScanError> {
    let mut summary = CountSummary::default();
    for path in list_images(dir)? {
        if let Some(kind) = ImageKind::from_path(&path) {
            *summary.counts.entry(kind).or_insert(0) += 1;
        }
        if let Some(name) = path.file_name() {
            summary.files.push(name.to_string_lossy().to_string());
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::touch_files;
    use tempfile::TempDir;

    #[test]
    fn lists_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        touch_files(
            tmp.path(),
            &["b.jpg", "a.png", "notes.txt", "c.webp", "d.gif", "e.jpeg"],
        );

        let names: Vec<String> = list_images(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg", "c.webp", "d.gif", "e.jpeg"]);
    }

    #[test]
    fn extension_match_ignores_case() {
        let tmp = TempDir::new().unwrap();
        touch_files(tmp.path(), &["UPPER.JPG", "mixed.Png"]);
        assert_eq!(list_images(tmp.path()).unwrap().len(), 2);
    }

    #[test]
    fn subdirectories_are_not_entered() {
        let tmp = TempDir::new().unwrap();
        touch_files(tmp.path(), &["top.jpg"]);
        let nested = tmp.path().join("old.jpg");
        std::fs::create_dir(&nested).unwrap();
        touch_files(&nested, &["inner.jpg"]);

        let files = list_images(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.jpg"));
    }

    #[test]
    fn missing_directory_is_error() {
        let result = list_images(Path::new("/nonexistent/gallery"));
        assert!(matches!(result, Err(ScanError::MissingDirectory(_))));
    }

    #[test]
    fn empty_directory_is_not_error() {
        let tmp = TempDir::new().unwrap();
        assert!(list_images(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn custom_extension_list() {
        let tmp = TempDir::new().unwrap();
        touch_files(tmp.path(), &["a.tif", "b.TIFF", "c.jpg"]);
        let files = list_with_extensions(tmp.path(), &["tif", "tiff"]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn image_refs_join_dir_and_filename() {
        let tmp = TempDir::new().unwrap();
        touch_files(tmp.path(), &["temple-gate.jpg"]);
        let refs = image_refs(tmp.path()).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].filename, "temple-gate.jpg");
        assert_eq!(
            refs[0].path,
            format!("{}/temple-gate.jpg", naming::posix_path(tmp.path()))
        );
        assert_eq!(refs[0].alt_text, "Temple Gate");
    }

    #[test]
    fn kind_from_extension() {
        assert_eq!(ImageKind::from_path(Path::new("a.JPEG")), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_path(Path::new("a.png")), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_path(Path::new("a.heic")), None);
        assert_eq!(ImageKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn count_tallies_per_kind() {
        let tmp = TempDir::new().unwrap();
        touch_files(
            tmp.path(),
            &["a.jpg", "b.JPG", "c.jpeg", "d.png", "e.PNG", "f.gif", "skip.txt"],
        );

        let summary = count_images(tmp.path()).unwrap();
        assert_eq!(summary.total(), 6);
        assert_eq!(summary.count(ImageKind::Jpeg), 3);
        assert_eq!(summary.count(ImageKind::Png), 2);
        assert_eq!(summary.count(ImageKind::Gif), 1);
        assert_eq!(summary.count(ImageKind::WebP), 0);
        assert_eq!(
            summary.non_jpeg().collect::<Vec<_>>(),
            vec!["d.png", "e.PNG", "f.gif"]
        );
    }
}
