//! Image backend trait and shared types.
//!
//! [`ImageBackend`] is the seam between deciding what to convert and doing
//! it. Production code uses [`RustBackend`](super::rust_backend::RustBackend);
//! tests use the recording [`tests::MockBackend`].

use super::params::ConvertParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

pub trait ImageBackend {
    /// Decode `params.source`, normalize its color mode, write a JPEG to
    /// `params.output`.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
