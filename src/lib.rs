//! # Gallery Forge
//!
//! Maintenance tools for a static site's photo gallery. The site's HTML is
//! hand-written; this crate owns one block of it, the filterable gallery, and
//! regenerates that block from whatever images sit in the gallery directory.
//!
//! # Architecture: Independent Commands
//!
//! Each command reads files, writes one artifact, and exits. They chain
//! through the filesystem, never through shared state:
//!
//! ```text
//! convert   originals/        →  converted/*.jpg
//! list      converted/        →  image_list.json
//! generate  converted/        →  gallery_generated.html
//! update    fragment + page   →  index.html (gallery block replaced)
//! sections  image_list.json   →  gallery_sections.html
//! count     converted/        →  image_count_result.txt
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`categorize`] | Ordered keyword rules mapping a filename to one category |
//! | [`render`] | Maud renderers for the filter fragment and per-category sections |
//! | [`splice`] | Marker-delimited replacement of the gallery block in a page |
//! | [`imaging`] | Pure-Rust decode, color normalization, JPEG encode |
//! | [`scan`] | Non-recursive, sorted, extension-filtered directory listing |
//! | [`list`] | The JSON image list artifact |
//! | [`config`] | `gallery.toml` loading, merging over stock defaults, validation |
//! | [`commands`] | One function per subcommand, wiring the above together |
//! | [`output`] | CLI report formatting |
//! | [`types`] | Category rules, image references, the image list |
//! | [`naming`] | Alt text and path helpers |
//!
//! # Design Decisions
//!
//! ## Categories Are Data
//!
//! The rule table is an ordered list read from config. Order is both
//! precedence (first keyword match wins) and display order. The last rule has
//! no keywords and takes everything else, so categorization is total: every
//! image lands in exactly one group.
//!
//! ## Maud For Markup
//!
//! Fragments are built with [Maud](https://maud.lambda.xyz/). Filenames end
//! up in attributes; auto-escaping means an odd filename cannot break the page.
//!
//! ## Splice, Don't Template
//!
//! The page is not generated. `update` finds two literal markers and replaces
//! what lies between, leaving every other byte alone. If a marker is missing
//! the page is not touched.

pub mod categorize;
pub mod commands;
pub mod config;
pub mod imaging;
pub mod list;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod splice;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
