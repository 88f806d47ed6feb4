//! Gallery configuration.
//!
//! Every command runs with no configuration at all: the stock defaults are
//! the paths and category table of the site this tool was written for. To
//! change any of it, drop a `gallery.toml` next to the site (or point
//! `--config` somewhere else) and override just the keys you need.
//!
//! ## Configuration Options
//!
//! ```toml
//! [paths]
//! source_dir = "assets/images/gallery"             # Originals for `convert`
//! converted_dir = "assets/images/gallery/converted" # Images the site shows
//! fragment_file = "gallery_generated.html"
//! image_list_file = "image_list.json"
//! count_file = "image_count_result.txt"
//! sections_file = "gallery_sections.html"
//! target_document = "index.html"
//!
//! [conversion]
//! quality = 95                   # JPEG quality (1-100)
//! source_extensions = ["png", "tif", "tiff", "webp"]  # ["heic", "heif"] with `heic`
//!
//! [gallery]
//! lightbox_group = "tozan-gallery"
//! base_url = "images/"
//!
//! [splice]
//! start_marker = '<div class="gallery-filters mb-4'
//! end_marker = "</div>\n    </div>\n  </section>\n\n  <!-- Visa Information Section -->"
//! joiner = "\n      "
//!
//! [[categories]]
//! id = "temple"
//! name = "Temple & Premises"
//! icon = "building"
//! keywords = ["temple-"]
//!
//! [[categories]]                 # Last entry: no keywords, catches the rest
//! id = "misc"
//! name = "Other Moments"
//! icon = "camera"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key by key over the defaults. Arrays replace wholesale, so a
//! config that lists `[[categories]]` defines the whole table.
//!
//! Unknown keys are rejected to catch typos early.

use crate::categorize::{RuleError, RuleTable};
use crate::imaging;
use crate::types::CategoryRule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// What `convert` picks up when the config names nothing: phone originals
/// when libheif is compiled in, otherwise the formats `image` decodes.
#[cfg(feature = "heic")]
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["heic", "heif"];
#[cfg(not(feature = "heic"))]
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "webp"];

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Category table error: {0}")]
    Categories(#[from] RuleError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Source format conversion settings.
    pub conversion: ConversionConfig,
    /// Values written into the generated markup.
    pub gallery: GalleryOptions,
    /// Insertion markers in the target document.
    pub splice: SpliceConfig,
    /// Ordered category table; the last entry is the catch-all.
    pub categories: Vec<CategoryRule>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            conversion: ConversionConfig::default(),
            gallery: GalleryOptions::default(),
            splice: SpliceConfig::default(),
            categories: default_categories(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.conversion.quality) {
            return Err(ConfigError::Validation(
                "conversion.quality must be 1-100".into(),
            ));
        }
        let supported = imaging::supported_input_extensions();
        for ext in &self.conversion.source_extensions {
            if !supported.contains(&ext.to_lowercase().as_str()) {
                return Err(ConfigError::Validation(format!(
                    "conversion.source_extensions: no decoder for '{ext}' (supported: {})",
                    supported.join(", ")
                )));
            }
        }
        if self.splice.start_marker.is_empty() || self.splice.end_marker.is_empty() {
            return Err(ConfigError::Validation(
                "splice markers must not be empty".into(),
            ));
        }
        self.rule_table()?;
        for (id, keyword) in self.unmatchable_keywords() {
            tracing::warn!(category = id, keyword, "keyword has upper-case letters and never matches");
        }
        Ok(())
    }

    /// `(category id, keyword)` pairs that can never match a lower-cased filename.
    pub fn unmatchable_keywords(&self) -> Vec<(&str, &str)> {
        self.categories
            .iter()
            .flat_map(|rule| {
                rule.keywords
                    .iter()
                    .filter(|k| k.chars().any(char::is_uppercase))
                    .map(move |k| (rule.id.as_str(), k.as_str()))
            })
            .collect()
    }

    /// The category table, validated and normalized.
    pub fn rule_table(&self) -> Result<RuleTable, RuleError> {
        RuleTable::new(self.categories.clone())
    }
}

/// Input and output locations, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the originals that `convert` reads.
    pub source_dir: PathBuf,
    /// Directory of web-ready images; `convert` writes here, everything else reads.
    pub converted_dir: PathBuf,
    /// HTML fragment written by `generate`, read by `update`.
    pub fragment_file: PathBuf,
    /// JSON image list written by `list`, read by `sections`.
    pub image_list_file: PathBuf,
    /// Plain-text summary written by `count`.
    pub count_file: PathBuf,
    /// Per-category HTML sections written by `sections`.
    pub sections_file: PathBuf,
    /// Page that `update` splices the fragment into.
    pub target_document: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: "assets/images/gallery".into(),
            converted_dir: "assets/images/gallery/converted".into(),
            fragment_file: "gallery_generated.html".into(),
            image_list_file: "image_list.json".into(),
            count_file: "image_count_result.txt".into(),
            sections_file: "gallery_sections.html".into(),
            target_document: "index.html".into(),
        }
    }
}

/// Settings for `convert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Extensions (case-insensitive) picked up from `paths.source_dir`.
    pub source_extensions: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quality: 95,
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Values written into the generated markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryOptions {
    /// `data-gallery` value grouping every fragment image into one lightbox.
    pub lightbox_group: String,
    /// Prefix for image links in the sections output (e.g. a CDN bucket).
    pub base_url: String,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            lightbox_group: "tozan-gallery".to_string(),
            base_url: "images/".to_string(),
        }
    }
}

/// Literal markers delimiting the gallery inside the target document.
///
/// The region replaced starts at `start_marker` and stops right before
/// `end_marker`, which is kept. The start marker is replaced only when the
/// fragment begins with it; any other marker stays in the page.
/// `joiner` goes between the fragment and the end marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpliceConfig {
    pub start_marker: String,
    pub end_marker: String,
    pub joiner: String,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            start_marker: r#"<div class="gallery-filters mb-4"#.to_string(),
            end_marker: "</div>\n    </div>\n  </section>\n\n  <!-- Visa Information Section -->"
                .to_string(),
            joiner: "\n      ".to_string(),
        }
    }
}

/// The stock category table.
pub fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "members",
            "Group Members",
            "people-fill",
            &["members-", "member-"],
        ),
        CategoryRule::new(
            "temple",
            "Temple & Premises",
            "building",
            &["temple-", "head-temple-", "salmon-gate-"],
        ),
        CategoryRule::new("fuji", "Mount Fuji", "mountain", &["mount-fuji-", "fuji-"]),
        CategoryRule::new(
            "travel",
            "Journey & Travel",
            "airplane",
            &["cathay-", "hongkong-", "narita-", "airport", "CX-", "wagon-"],
        ),
        CategoryRule::new(
            "accommodation",
            "Hotel & Dining",
            "house-heart",
            &["fujiyen-hotel", "dinner-", "meal-", "food"],
        ),
        CategoryRule::new(
            "local",
            "Local Sights",
            "geo-alt",
            &["fujinomiya-", "waterfall", "vending", "streets"],
        ),
        CategoryRule::new("misc", "Other Moments", "camera", &[]),
    ]
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value. `Ok(None)` when it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` over the stock defaults.
///
/// A missing file is not an error: the defaults are returned as-is.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::info!(path = %path.display(), "loaded config");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    &STOCK_CONFIG_TOML
}

static STOCK_CONFIG_TOML: LazyLock<String> = LazyLock::new(|| {
    let extensions: Vec<String> = DEFAULT_SOURCE_EXTENSIONS
        .iter()
        .map(|ext| format!("\"{ext}\""))
        .collect();
    STOCK_CONFIG_TEMPLATE.replace(
        "@SOURCE_EXTENSIONS@",
        &format!("[{}]", extensions.join(", ")),
    )
});

const STOCK_CONFIG_TEMPLATE: &str = r##"# gallery-forge configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Tables merge over the defaults key by key; arrays (including the
# [[categories]] list) replace the default wholesale.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paths, relative to the directory the command runs in
# ---------------------------------------------------------------------------
[paths]
# Originals read by `convert`.
source_dir = "assets/images/gallery"
# Web-ready images: written by `convert`, read by every other command.
converted_dir = "assets/images/gallery/converted"
# Filter buttons + image grid, written by `generate`, read by `update`.
fragment_file = "gallery_generated.html"
# JSON list of image filenames, written by `list`, read by `sections`.
image_list_file = "image_list.json"
# Plain-text summary written by `count`.
count_file = "image_count_result.txt"
# Per-category sections written by `sections`.
sections_file = "gallery_sections.html"
# Page `update` splices the fragment into.
target_document = "index.html"

# ---------------------------------------------------------------------------
# Conversion
# ---------------------------------------------------------------------------
[conversion]
# JPEG quality (1 = worst, 100 = best).
quality = 95
# Source extensions picked up by `convert` (case-insensitive).
# Each must have a decoder compiled in: jpg, jpeg, png, tif, tiff, webp, gif,
# plus heic and heif in builds with the `heic` feature (where they are the
# default).
source_extensions = @SOURCE_EXTENSIONS@

# ---------------------------------------------------------------------------
# Generated markup
# ---------------------------------------------------------------------------
[gallery]
# data-gallery attribute shared by every image of the fragment.
lightbox_group = "tozan-gallery"
# Prefix for image links in the sections output.
base_url = "images/"

# ---------------------------------------------------------------------------
# Splice markers
# ---------------------------------------------------------------------------
# `update` replaces everything from start_marker up to end_marker (kept)
# with the fragment followed by joiner. The start marker is kept too, unless
# the fragment begins with it (the stock one does) and re-emits it.
[splice]
start_marker = '<div class="gallery-filters mb-4'
end_marker = "</div>\n    </div>\n  </section>\n\n  <!-- Visa Information Section -->"
joiner = "\n      "

# ---------------------------------------------------------------------------
# Categories
# ---------------------------------------------------------------------------
# Checked top to bottom; the first rule with a keyword contained in the
# (lower-cased) filename wins. The last rule must have no keywords: it
# collects everything else. Order is also the order of the filter buttons.
# Keywords are compared as written, so one with upper-case letters (like
# the stock "CX-") never matches.

[[categories]]
id = "members"
name = "Group Members"
icon = "people-fill"
keywords = ["members-", "member-"]

[[categories]]
id = "temple"
name = "Temple & Premises"
icon = "building"
keywords = ["temple-", "head-temple-", "salmon-gate-"]

[[categories]]
id = "fuji"
name = "Mount Fuji"
icon = "mountain"
keywords = ["mount-fuji-", "fuji-"]

[[categories]]
id = "travel"
name = "Journey & Travel"
icon = "airplane"
keywords = ["cathay-", "hongkong-", "narita-", "airport", "CX-", "wagon-"]

[[categories]]
id = "accommodation"
name = "Hotel & Dining"
icon = "house-heart"
keywords = ["fujiyen-hotel", "dinner-", "meal-", "food"]

[[categories]]
id = "local"
name = "Local Sights"
icon = "geo-alt"
keywords = ["fujinomiya-", "waterfall", "vending", "streets"]

[[categories]]
id = "misc"
name = "Other Moments"
icon = "camera"
keywords = []
"##;
