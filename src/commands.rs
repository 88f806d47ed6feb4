//! One function per subcommand.
//!
//! Each reads its inputs from the paths in [`GalleryConfig`], writes its
//! artifact, and prints its report through [`output`]. "No images" is a
//! normal outcome: it is reported and the command returns `Ok(None)` without
//! writing anything.
//!
//! ```text
//! convert   source_dir ──► converted_dir/*.jpg
//! count     converted_dir ──► count_file
//! list      converted_dir ──► image_list_file
//! generate  converted_dir ──► fragment_file
//! sections  image_list_file ──► sections_file
//! update    fragment_file + target_document ──► target_document
//! build     list → generate → update
//! ```

use crate::categorize::{CategorizedGroups, RuleError};
use crate::config::{ConfigError, GalleryConfig};
use crate::imaging::{self, ConvertError, ConvertSummary, ImageBackend, Quality};
use crate::list::{self, ListError};
use crate::output;
use crate::render;
use crate::scan::{self, CountSummary, ScanError};
use crate::splice::{self, SpliceError, SpliceOutcome};
use crate::types::{ImageList, ImageRef};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Category table error: {0}")]
    Categories(#[from] RuleError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Image list error: {0}")]
    List(#[from] ListError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Splice(#[from] SpliceError),
    #[error("Build cancelled before {stage}")]
    Interrupted { stage: &'static str },
}

impl CommandError {
    /// Process exit status for this failure: 130 for a user interrupt,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        if self.is_cancellation() { 130 } else { 1 }
    }

    /// True when the command stopped because of Ctrl-C. The command has
    /// already printed its own cancellation report.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            CommandError::Convert(ConvertError::Cancelled { .. }) | CommandError::Interrupted { .. }
        )
    }
}

/// Re-encode every source image as JPEG into the converted directory.
pub fn convert(
    config: &GalleryConfig,
    backend: &impl ImageBackend,
    cancel: &AtomicBool,
) -> Result<Option<ConvertSummary>, CommandError> {
    let extensions: Vec<&str> = config
        .conversion
        .source_extensions
        .iter()
        .map(String::as_str)
        .collect();
    let sources = scan::list_with_extensions(&config.paths.source_dir, &extensions)?;
    if sources.is_empty() {
        output::print_no_images(&config.paths.source_dir);
        return Ok(None);
    }

    let quality = Quality::new(config.conversion.quality);
    for line in output::format_convert_start(&config.paths.source_dir, sources.len(), quality.value())
    {
        println!("{}", line);
    }

    let mut index = 0;
    let result = imaging::convert_all(
        backend,
        &sources,
        &config.paths.converted_dir,
        quality,
        cancel,
        |event| {
            index += 1;
            output::print_convert_event(index, event);
        },
    );

    match result {
        Ok(summary) => {
            output::print_convert_summary(&summary);
            Ok(Some(summary))
        }
        Err(ConvertError::Cancelled { converted, failed }) => {
            for line in output::format_convert_cancelled(converted, failed) {
                println!("{}", line);
            }
            Err(ConvertError::Cancelled { converted, failed }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Tally the converted directory and write the count file.
pub fn count(config: &GalleryConfig) -> Result<CountSummary, CommandError> {
    let summary = scan::count_images(&config.paths.converted_dir)?;
    let mut report = output::format_count_summary(&summary).join("\n");
    report.push('\n');
    std::fs::write(&config.paths.count_file, report)?;
    output::print_count_summary(&summary, &config.paths.count_file);
    Ok(summary)
}

/// Write the image list artifact for the converted directory.
pub fn list(config: &GalleryConfig) -> Result<Option<ImageList>, CommandError> {
    let image_list = list::build_image_list(&config.paths.converted_dir)?;
    if image_list.images.is_empty() {
        output::print_no_images(&config.paths.converted_dir);
        return Ok(None);
    }
    list::write_image_list(&image_list, &config.paths.image_list_file)?;
    output::print_image_list(&image_list, &config.paths.image_list_file);
    Ok(Some(image_list))
}

/// Categorize the converted directory and write the gallery fragment.
pub fn generate(config: &GalleryConfig) -> Result<Option<CategorizedGroups>, CommandError> {
    let table = config.rule_table()?;
    let images = scan::image_refs(&config.paths.converted_dir)?;
    if images.is_empty() {
        output::print_no_images(&config.paths.converted_dir);
        return Ok(None);
    }

    let groups = table.group(images);
    let html = render::render_fragment(&groups, &config.gallery.lightbox_group).into_string();
    std::fs::write(&config.paths.fragment_file, html)?;
    output::print_category_breakdown("Gallery fragment", &groups, &config.paths.fragment_file);
    Ok(Some(groups))
}

/// Render per-category sections from the image list artifact.
pub fn sections(config: &GalleryConfig) -> Result<Option<CategorizedGroups>, CommandError> {
    let table = config.rule_table()?;
    let image_list = list::read_image_list(&config.paths.image_list_file)?;
    if image_list.images.is_empty() {
        output::print_no_images(&config.paths.image_list_file);
        return Ok(None);
    }

    let images = image_list
        .images
        .iter()
        .map(|name| ImageRef::with_base(&config.gallery.base_url, name));
    let groups = table.group(images);
    let html = render::render_sections(&groups).into_string();
    std::fs::write(&config.paths.sections_file, html)?;
    output::print_category_breakdown("Gallery sections", &groups, &config.paths.sections_file);
    Ok(Some(groups))
}

/// Splice the fragment file into the target document.
pub fn update(config: &GalleryConfig) -> Result<SpliceOutcome, CommandError> {
    let outcome = splice::update_document(
        &config.paths.target_document,
        &config.paths.fragment_file,
        &config.splice,
    )?;
    output::print_splice_outcome(&outcome);
    Ok(outcome)
}

fn check_cancel(cancel: &AtomicBool, stage: &'static str) -> Result<(), CommandError> {
    if cancel.load(Ordering::SeqCst) {
        for line in output::format_build_cancelled(stage) {
            println!("{}", line);
        }
        return Err(CommandError::Interrupted { stage });
    }
    Ok(())
}

/// `list`, then `generate`, then `update`. Stops quietly after a stage that
/// found no images. `cancel` is checked before each stage, so an interrupt
/// never leaves the page half-way through an update.
pub fn build(
    config: &GalleryConfig,
    cancel: &AtomicBool,
) -> Result<Option<SpliceOutcome>, CommandError> {
    check_cancel(cancel, "listing")?;
    println!("==> Stage 1: Listing {}", config.paths.converted_dir.display());
    if list(config)?.is_none() {
        return Ok(None);
    }

    check_cancel(cancel, "generating")?;
    println!("==> Stage 2: Generating {}", config.paths.fragment_file.display());
    if generate(config)?.is_none() {
        return Ok(None);
    }

    check_cancel(cancel, "updating")?;
    println!("==> Stage 3: Updating {}", config.paths.target_document.display());
    let outcome = update(config)?;

    println!("==> Build complete");
    Ok(Some(outcome))
}
