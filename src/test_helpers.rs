//! Shared test utilities: synthetic photos and throwaway album directories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = album_dir(r#"{"name": "Trip", "pictures": {"a.jpg": {"caption": "Hi"}}}"#);
//! create_test_jpeg(&tmp.path().join("a.jpg"), 80, 60);
//! let album = load_album(&tmp.path().join("album.json")).unwrap();
//! ```

use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// A temp directory holding `album.json` with the given contents.
pub fn album_dir(json: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("album.json"), json).unwrap();
    tmp
}

// =========================================================================
// Pixel assertions
// =========================================================================

/// Assert a pixel is within `tolerance` of `expected` on every channel.
///
/// JPEG round trips shift colors slightly, so exact equality is too strict.
pub fn assert_pixel_near(img: &RgbImage, x: u32, y: u32, expected: [u8; 3], tolerance: u8) {
    let actual = img.get_pixel(x, y).0;
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= tolerance);
    assert!(
        close,
        "pixel ({x}, {y}) is {actual:?}, expected {expected:?} ± {tolerance}"
    );
}
