//! Parameter types for writing rendered pictures.
//!
//! These structs describe *what* to write, not *how*. They are the interface
//! between the compositor (which decides the output path and format) and the
//! [`backend`](super::backend) (which does the encoding). This separation
//! allows swapping backends (e.g. for testing with a mock) without changing
//! compositing logic.
//!
//! ## Types
//!
//! - [`OutputFormat`] — encoded file format, parsed from the `file-format` setting.
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`SaveParams`] — Full specification for a write: output path, format, quality.

use image::ImageFormat;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

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
        Self(90)
    }
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    WebP,
    Avif,
}

impl OutputFormat {
    /// Parse a `file-format` value (an extension, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "webp" => Some(Self::WebP),
            "avif" => Some(Self::Avif),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
            Self::WebP => ImageFormat::WebP,
            Self::Avif => ImageFormat::Avif,
        }
    }
}

/// Parameters for writing one finished picture.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveParams {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub quality: Quality,
}
