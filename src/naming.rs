//! Filename to display text.
//!
//! Gallery images carry no metadata we trust, so the alt text shown to screen
//! readers and in the lightbox caption is derived from the filename alone:
//!
//! - `temple-main_gate.jpg` → "Temple Main Gate"
//! - `CX-510-boarding.jpeg` → "Cx 510 Boarding"
//! - `fuji.2.png` → "Fuji.2"  (only the last extension is dropped)
//!
//! Title-casing follows the usual "capitalize after anything that is not a
//! cased letter" rule, so digits and apostrophes start a new word.

use std::path::Path;

/// The filename with its last extension removed.
pub fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Alt text for an image: stem, separators to spaces, title-cased.
pub fn alt_text(filename: &str) -> String {
    let spaced = file_stem(filename).replace(['-', '_'], " ");
    title_case(&spaced)
}

/// Upper-case the first cased letter of every word, lower-case the rest.
///
/// A word starts after any character that is not itself a cased letter.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && previous_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }
    out
}

/// Render a path with forward slashes, as it appears in `href` attributes.
pub fn posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_drops_last_extension_only() {
        assert_eq!(file_stem("fuji.2.png"), "fuji.2");
        assert_eq!(file_stem("temple-gate.jpg"), "temple-gate");
        assert_eq!(file_stem("noext"), "noext");
    }

    #[test]
    fn alt_text_replaces_dashes_and_underscores() {
        assert_eq!(alt_text("temple-main_gate.jpg"), "Temple Main Gate");
    }

    #[test]
    fn alt_text_lowercases_shouting() {
        assert_eq!(alt_text("HONGKONG-TRANSIT.PNG"), "Hongkong Transit");
    }

    #[test]
    fn title_case_digits_start_new_word() {
        assert_eq!(title_case("cx 510boarding"), "Cx 510Boarding");
    }

    #[test]
    fn title_case_apostrophe_starts_new_word() {
        assert_eq!(title_case("pilgrim's path"), "Pilgrim'S Path");
    }

    #[test]
    fn title_case_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_non_ascii() {
        assert_eq!(title_case("élan über"), "Élan Über");
    }

    #[test]
    fn posix_path_uses_forward_slashes() {
        assert_eq!(
            posix_path(Path::new("assets/images/gallery/converted/a.jpg")),
            "assets/images/gallery/converted/a.jpg"
        );
    }
}
