//! Batch conversion.
//!
//! [`convert_all`] walks a list of source files, asks the backend to re-encode
//! each as `<stem>.jpg` in the output directory, and keeps going when a file
//! fails: failures are reported through the event callback and counted, never
//! propagated. The only ways to stop early are an I/O error creating the
//! output directory and the cancel flag.

use super::backend::ImageBackend;
use super::params::{ConvertParams, Quality};
use crate::naming;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Conversion cancelled after {converted} converted, {failed} failed")]
    Cancelled { converted: usize, failed: usize },
}

/// Progress reported once per source file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertEvent {
    Converted {
        source: String,
        output: String,
        source_bytes: u64,
        output_bytes: u64,
    },
    Failed {
        source: String,
        output: String,
        error: String,
    },
}

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub converted: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

/// Output path for a source: same stem, `.jpg`, inside `output_dir`.
pub fn output_path_for(source: &Path, output_dir: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{}.jpg", naming::file_stem(&name)))
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Convert every source file, in order.
///
/// `cancel` is checked before each file; once set, the run stops with
/// [`ConvertError::Cancelled`] and the files already written stay on disk.
pub fn convert_all(
    backend: &impl ImageBackend,
    sources: &[PathBuf],
    output_dir: &Path,
    quality: Quality,
    cancel: &AtomicBool,
    mut on_event: impl FnMut(&ConvertEvent),
) -> Result<ConvertSummary, ConvertError> {
    std::fs::create_dir_all(output_dir)?;

    let mut converted = 0;
    let mut failed = 0;

    for source in sources {
        if cancel.load(Ordering::SeqCst) {
            return Err(ConvertError::Cancelled { converted, failed });
        }

        let output = output_path_for(source, output_dir);
        let params = ConvertParams {
            source: source.clone(),
            output: output.clone(),
            quality,
        };

        let event = match backend.convert(&params) {
            Ok(()) => {
                converted += 1;
                ConvertEvent::Converted {
                    source: display_name(source),
                    output: display_name(&output),
                    source_bytes: file_size(source),
                    output_bytes: file_size(&output),
                }
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(source = %source.display(), error = %e, "conversion failed");
                ConvertEvent::Failed {
                    source: display_name(source),
                    output: display_name(&output),
                    error: e.to_string(),
                }
            }
        };
        on_event(&event);
    }

    Ok(ConvertSummary {
        converted,
        failed,
        output_dir: output_dir.to_path_buf(),
    })
}
