//! Pure Rust image backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image::ImageReader` with content sniffing |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with configured quality |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |
//! | Encode → PNG, BMP, TIFF, WebP | `DynamicImage::write_to` (lossless) |

use super::backend::{BackendError, ImageBackend};
use super::params::{OutputFormat, SaveParams};
use image::{DynamicImage, ImageReader, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
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

fn encode_failed(path: &Path, e: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
}

impl ImageBackend for RustBackend {
    fn open(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        if !path.is_file() {
            return Err(BackendError::NotFound(path.to_path_buf()));
        }
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })
    }

    fn save(&self, image: &RgbImage, params: &SaveParams) -> Result<(), BackendError> {
        let path = params.output.as_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let quality = params.quality.value() as u8;
        let img = DynamicImage::ImageRgb8(image.clone());

        match params.format {
            OutputFormat::Jpeg => {
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality);
                img.write_with_encoder(encoder)
            }
            OutputFormat::Avif => {
                let encoder =
                    image::codecs::avif::AvifEncoder::new_with_speed_quality(&mut writer, 6, quality);
                img.write_with_encoder(encoder)
            }
            other => img.write_to(&mut writer, other.image_format()),
        }
        .map_err(|e| encode_failed(path, e))
    }
}
