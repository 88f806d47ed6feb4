//! HTML fragment rendering with maud.
//!
//! Two renderers share the per-image markup:
//!
//! - [`render_fragment`]: filter buttons plus one flat grid, spliced into the
//!   page by `update`. Each item carries `data-category` so the page script
//!   can filter.
//! - [`render_sections`]: one headed section per category, each with its own
//!   grid and lightbox group, for pages that show categories stacked.
//!
//! Both walk the groups in table order and skip empty categories. Output is
//! compact (no indentation); the page's own whitespace around the splice
//! points is left alone.

use crate::categorize::{CategorizedGroups, Group};
use crate::types::ImageRef;
use maud::{Markup, html};

/// One lightbox-enabled thumbnail.
fn gallery_item(image: &ImageRef, lightbox_group: &str) -> Markup {
    html! {
        a href=(image.path) class="glightbox" data-gallery=(lightbox_group) {
            img src=(image.path) alt=(image.alt_text) loading="lazy";
            div class="gallery-overlay" {
                i class="bi bi-zoom-in" {}
            }
        }
    }
}

fn filter_button(filter: &str, icon: &str, label: &str, count: usize, active: bool) -> Markup {
    html! {
        button
            class=(if active { "btn btn-outline-primary active" } else { "btn btn-outline-primary" })
            data-filter=(filter)
        {
            i class={ "bi bi-" (icon) } {}
            " " (label) " (" (count) ")"
        }
    }
}

/// Filter controls followed by the image grid.
///
/// The controls are an "All" button with the total, then one button per
/// non-empty category. With no images at all both the control bar and the
/// grid are empty, but their containers are still emitted so the page keeps
/// its splice marker.
pub fn render_fragment(groups: &CategorizedGroups, lightbox_group: &str) -> Markup {
    let total = groups.total();
    html! {
        div class="gallery-filters mb-4 text-center" {
            @if total > 0 {
                (filter_button("all", "grid-3x3", "All", total, true))
                @for group in groups.non_empty() {
                    (filter_button(&group.rule.id, &group.rule.icon, &group.rule.name, group.images.len(), false))
                }
            }
        }
        div class="gallery-grid" {
            @for group in groups.non_empty() {
                @for image in &group.images {
                    div class="gallery-item" data-category=(group.rule.id) {
                        (gallery_item(image, lightbox_group))
                    }
                }
            }
        }
    }
}

fn category_section(group: &Group) -> Markup {
    html! {
        div class="gallery-category" id=(group.rule.id) {
            h3 class="category-title" {
                i class={ "bi bi-" (group.rule.icon) } {}
                " " (group.rule.name) " "
                span class="photo-count" { "(" (group.images.len()) " photos)" }
            }
            div class="gallery-grid" {
                @for image in &group.images {
                    div class="gallery-item" {
                        (gallery_item(image, &group.rule.id))
                    }
                }
            }
        }
    }
}

/// One section per non-empty category. Image links should already carry the
/// base URL (see [`ImageRef::with_base`]).
pub fn render_sections(groups: &CategorizedGroups) -> Markup {
    html! {
        @for group in groups.non_empty() {
            (category_section(group))
        }
    }
}
