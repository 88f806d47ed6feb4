//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. The conversion loop in
//! [`operations`](super::operations) fills them in; a
//! [`backend`](super::backend) does the pixel work. Tests swap in a mock
//! backend without touching the loop.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Re-encode one source file as a JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}
