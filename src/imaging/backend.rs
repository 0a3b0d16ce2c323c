//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the decode/encode seam: `open` turns a file
//! into pixels, `save` turns a finished canvas into a file. Everything in
//! between (resizing, pasting, text) happens in memory in the compositor.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, on the
//! `image` crate. Tests use the recording mock in [`tests`].

use super::params::SaveParams;
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Decode an image file. Missing files report [`BackendError::NotFound`].
    fn open(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` and write it as described by `params`, creating parent
    /// directories as needed.
    fn save(&self, image: &RgbImage, params: &SaveParams) -> Result<(), BackendError>;
}
