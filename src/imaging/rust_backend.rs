//! Conversion backend built on the `image` crate.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF) | `image::ImageReader` (format sniffed from content) |
//! | Decode (HEIC, HEIF) | `libheif_rs::LibHeif::decode`, `heic` feature only |
//! | Color normalization | [`normalize_color`] → `DynamicImage::to_rgb8` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//!
//! Without the `heic` feature the build is pure Rust and HEIC/HEIF originals
//! are rejected; with it, they are decoded through the system libheif.

use super::backend::{BackendError, ImageBackend};
use super::params::ConvertParams;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;
use std::sync::LazyLock;

const DECODER_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("gif", ImageFormat::Gif),
];

/// Extensions decoded by libheif rather than `image`.
#[cfg(feature = "heic")]
const HEIF_EXTENSIONS: &[&str] = &["heic", "heif"];
#[cfg(not(feature = "heic"))]
const HEIF_EXTENSIONS: &[&str] = &[];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    DECODER_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .chain(HEIF_EXTENSIONS.iter().copied())
        .collect()
});

/// Lower-case extensions that have a decoder compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_heif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEIF_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(feature = "heic")]
fn load_heif(path: &Path) -> Result<DynamicImage, BackendError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let failed = |e: &dyn std::fmt::Display| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    };
    // libheif reports a missing file as a decode error; keep it an I/O error
    std::fs::metadata(path).map_err(BackendError::Io)?;
    let path_str = path
        .to_str()
        .ok_or_else(|| failed(&"path is not valid UTF-8"))?;

    let lib = LibHeif::new();
    let ctx = HeifContext::read_from_file(path_str).map_err(|e| failed(&e))?;
    let handle = ctx.primary_image_handle().map_err(|e| failed(&e))?;
    let decoded = lib
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| failed(&e))?;
    let plane = decoded
        .planes()
        .interleaved
        .ok_or_else(|| failed(&"no interleaved RGB plane"))?;

    let (width, height) = (plane.width, plane.height);
    let row_len = width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        let row = row
            .get(..row_len)
            .ok_or_else(|| failed(&"decoded plane is shorter than its dimensions"))?;
        pixels.extend_from_slice(row);
    }
    image::RgbImage::from_raw(width, height, pixels)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| failed(&"decoded plane is shorter than its dimensions"))
}

#[cfg(not(feature = "heic"))]
fn load_heif(path: &Path) -> Result<DynamicImage, BackendError> {
    Err(BackendError::ProcessingFailed(format!(
        "{}: HEIC/HEIF decoding needs the `heic` feature",
        path.display()
    )))
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    if is_heif(path) {
        return load_heif(path);
    }
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// RGB and 8-bit grayscale pass through; every other color type (alpha,
/// 16-bit, float) becomes 8-bit RGB. Alpha is dropped, not composited.
pub fn normalize_color(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = normalize_color(load_image(&params.source)?);
        save_jpeg(&img, &params.output, params.quality.value())
    }
}
