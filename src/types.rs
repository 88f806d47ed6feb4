//! Shared types passed between commands.
//!
//! [`CategoryRule`] is deserialized from `gallery.toml`, [`ImageList`] is the
//! JSON artifact written by `list` and read back by `sections`, and
//! [`ImageRef`] is what the renderers consume.

use crate::naming;
use serde::{Deserialize, Serialize};

/// One row of the category table.
///
/// A rule matches a filename when any of its keywords is a substring of the
/// lower-cased filename. The last rule of a table has no keywords and catches
/// everything the earlier rules did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRule {
    /// Identifier used in `data-filter` / `data-category` attributes.
    pub id: String,
    /// Label shown on the filter button and section heading.
    pub name: String,
    /// Bootstrap icon name without the `bi-` prefix.
    pub icon: String,
    /// Substrings to look for. Empty for the catch-all.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(id: &str, name: &str, icon: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.keywords.is_empty()
    }

    /// `lowered` must already be lower-cased.
    pub(crate) fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// An image as the renderers see it: where to link, and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Bare filename, the input to categorization.
    pub filename: String,
    /// Path written into `href` / `src`, forward slashes only.
    pub path: String,
    /// Title-cased stem with `-` and `_` turned into spaces.
    pub alt_text: String,
}

impl ImageRef {
    /// Build a reference from a relative path such as
    /// `assets/images/gallery/converted/temple-gate.jpg`.
    pub fn new(path: &str) -> Self {
        let path = path.replace('\\', "/");
        let filename = path.rsplit('/').next().unwrap_or(&path).to_string();
        let alt_text = naming::alt_text(&filename);
        Self {
            filename,
            path,
            alt_text,
        }
    }

    /// Reference whose link target is `base` followed by the filename.
    pub fn with_base(base: &str, filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            path: format!("{base}{filename}"),
            alt_text: naming::alt_text(filename),
        }
    }
}

/// Flat list of image filenames, the interchange between `list` and
/// `sections`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageList {
    pub images: Vec<String>,
}
