//! Image conversion, pure Rust unless the `heic` feature links libheif.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader`; `libheif-rs` for HEIC/HEIF with `heic` |
//! | **Normalize** | non-RGB / non-grayscale → 8-bit RGB |
//! | **Encode** | `JpegEncoder` with configurable quality |
//!
//! The module is split into:
//! - **Parameters**: what to convert, where, at which quality
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: the batch loop, per-file failure accounting, cancellation

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use operations::{ConvertError, ConvertEvent, ConvertSummary, convert_all, output_path_for};
pub use params::{ConvertParams, Quality};
pub use rust_backend::{RustBackend, normalize_color, supported_input_extensions};
