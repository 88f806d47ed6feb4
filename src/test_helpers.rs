//! Shared test utilities for the gallery-forge test suite.
//!
//! Provides rule tables, scratch-file helpers, synthetic images, and a page
//! skeleton carrying the stock splice markers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! touch_files(tmp.path(), &["temple-gate.jpg", "fuji-view.jpg"]);
//!
//! let groups = sample_table().group(scan::image_refs(tmp.path()).unwrap());
//! assert_eq!(groups.get("temple").unwrap().images.len(), 1);
//! ```

use std::path::Path;

use crate::categorize::RuleTable;
use crate::config;
use crate::types::CategoryRule;

// =========================================================================
// Rule tables
// =========================================================================

/// The three-rule table from the documentation examples:
/// temple (`temple-`), fuji (`fuji-`), misc (catch-all).
pub fn sample_table() -> RuleTable {
    RuleTable::new(vec![
        CategoryRule::new("temple", "Temple", "building", &["temple-"]),
        CategoryRule::new("fuji", "Fuji", "mountain", &["fuji-"]),
        CategoryRule::new("misc", "Misc", "camera", &[]),
    ])
    .unwrap()
}

/// The stock seven-category table.
pub fn site_table() -> RuleTable {
    RuleTable::new(config::default_categories()).unwrap()
}

// =========================================================================
// Files
// =========================================================================

/// Create empty files with the given names in `dir`.
pub fn touch_files(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").unwrap();
    }
}

/// A minimal page whose gallery block holds `body`, framed by the stock
/// start and end markers.
pub fn sample_page(body: &str) -> String {
    format!(
        "<html>\n<body>\n  <section id=\"gallery\">\n    <div class=\"container\">\n      \
         <div class=\"gallery-filters mb-4 text-center\">\n        {body}\n      </div>\n      \
         <div class=\"gallery-grid\">\n      </div>\n    </div>\n  </section>\n\n  \
         <!-- Visa Information Section -->\n  <section id=\"visa\"></section>\n</body>\n</html>\n"
    )
}

// =========================================================================
// Synthetic images
// =========================================================================

/// Write an RGBA PNG with a gradient and a half-transparent alpha channel.
pub fn write_test_png_rgba(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 127])
    });
    img.save(path).unwrap();
}

/// Write an 8-bit grayscale PNG.
pub fn write_test_png_gray(path: &Path, width: u32, height: u32) {
    let img = image::GrayImage::from_fn(width, height, |x, y| image::Luma([((x + y) % 256) as u8]));
    img.save(path).unwrap();
}
