//! Replace the gallery block of a page with a generated fragment.
//!
//! The block is found by two literal markers. Everything from the start of
//! `start_marker` up to (not including) the first `end_marker` after it is
//! replaced by `fragment + joiner`. When the fragment itself begins with the
//! start marker (the stock `<div class="gallery-filters mb-4` does) the old
//! marker is consumed and the fragment re-emits it; otherwise the marker is
//! kept in front of the fragment. The end marker always survives. Either way
//! the page still carries both markers afterwards, so splicing the same
//! fragment twice yields the same page.
//!
//! ```text
//! before:  …<div class="gallery-filters mb-4 …OLD GALLERY…</div>⏎    </div>⏎  </section>…
//! after:   …<div class="gallery-filters mb-4 …NEW FRAGMENT⏎      </div>⏎    </div>⏎  </section>…
//! ```
//!
//! If either marker is missing nothing is written.

use crate::config::SpliceConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Start marker not found in {}: {marker:?}", .document.display())]
    MissingStartMarker { document: PathBuf, marker: String },
    #[error("End marker not found after the start marker in {}: {marker:?}", .document.display())]
    MissingEndMarker { document: PathBuf, marker: String },
}

/// Where the markers sit in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerSearch {
    Found { start: usize, end: usize },
    NoStart,
    NoEnd,
}

fn find_markers(document: &str, config: &SpliceConfig) -> MarkerSearch {
    let Some(start) = document.find(&config.start_marker) else {
        return MarkerSearch::NoStart;
    };
    let after_start = start + config.start_marker.len();
    match document[after_start..].find(&config.end_marker) {
        Some(offset) => MarkerSearch::Found {
            start,
            end: after_start + offset,
        },
        None => MarkerSearch::NoEnd,
    }
}

/// Pure splice over strings. `None` means a marker is missing; use
/// [`update_document`] for the file-level operation with error reporting.
pub fn splice(document: &str, fragment: &str, config: &SpliceConfig) -> Option<String> {
    let MarkerSearch::Found { start, end } = find_markers(document, config) else {
        return None;
    };
    Some(splice_at(document, fragment, config, start, end))
}

fn splice_at(
    document: &str,
    fragment: &str,
    config: &SpliceConfig,
    start: usize,
    end: usize,
) -> String {
    let keep_to = if fragment.starts_with(&config.start_marker) {
        start
    } else {
        start + config.start_marker.len()
    };
    let mut out = String::with_capacity(document.len() + fragment.len());
    out.push_str(&document[..keep_to]);
    out.push_str(fragment);
    out.push_str(&config.joiner);
    out.push_str(&document[end..]);
    out
}

/// What `update_document` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    pub document: PathBuf,
    pub fragment_bytes: usize,
    /// False when the page already held exactly this fragment.
    pub changed: bool,
}

/// Splice the fragment file into the document file.
///
/// The new page is written to a sibling temp file and renamed over the
/// document, so a failure mid-write leaves the original intact.
pub fn update_document(
    document_path: &Path,
    fragment_path: &Path,
    config: &SpliceConfig,
) -> Result<SpliceOutcome, SpliceError> {
    let fragment = std::fs::read_to_string(fragment_path)?;
    let document = std::fs::read_to_string(document_path)?;

    let (start, end) = match find_markers(&document, config) {
        MarkerSearch::Found { start, end } => (start, end),
        MarkerSearch::NoStart => {
            return Err(SpliceError::MissingStartMarker {
                document: document_path.to_path_buf(),
                marker: config.start_marker.clone(),
            });
        }
        MarkerSearch::NoEnd => {
            return Err(SpliceError::MissingEndMarker {
                document: document_path.to_path_buf(),
                marker: config.end_marker.clone(),
            });
        }
    };
    tracing::debug!(start, end, "located gallery block");

    let updated = splice_at(&document, &fragment, config, start, end);
    let changed = updated != document;
    if changed {
        write_replacing(document_path, &updated)?;
    }

    Ok(SpliceOutcome {
        document: document_path.to_path_buf(),
        fragment_bytes: fragment.len(),
        changed,
    })
}

fn write_replacing(path: &Path, content: &str) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)
}
