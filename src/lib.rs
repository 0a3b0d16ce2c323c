//! # Caption Album
//!
//! Renders a photo album into captioned image files. The album is a single
//! JSON file: a name, an ordered map of picture files to captions, and a set
//! of album-wide settings that each picture may override.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      album.json  →  AlbumConfig        (defaults filled, validated)
//! 2. Resolve   picture n   →  EffectiveConfig    (album settings ← picture overrides)
//! 3. Compose   config      →  canvas             (layout, fit, caption, watermark)
//! 4. Write     canvas      →  "<name> (<n>).ext" (one file per picture)
//! ```
//!
//! Steps 2–4 run once per picture, strictly in album order. A picture that
//! fails at any of them is reported and skipped; only an unreadable album
//! file stops the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Album JSON loading, stock defaults, per-picture merging |
//! | [`color`] | `#RGB`, `#RRGGBB` and `rgb(r, g, b)` parsing with black fallback |
//! | [`imaging`] | Layout and fit geometry, caption wrapping and fonts, image I/O backend |
//! | [`compose`] | Builds one finished image from one picture's settings |
//! | [`album`] | Drives the whole album and collects per-picture outcomes |
//! | [`naming`] | `"<album> (<n>).<ext>"` output file names |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Geometry Is Pure
//!
//! [`imaging::layout`] and [`imaging::fit`] compute rectangles from numbers
//! and never touch pixels. Every layout rule is unit tested with exact
//! integer results, independent of image decoding or installed fonts.
//!
//! ## Explicit Album Context
//!
//! Album-wide values (name, album directory, output directory) travel in an
//! [`album::AlbumContext`] passed to each render. There is no process-wide
//! mutable state, and per-picture settings are a fresh merge every time.
//!
//! ## Lenient Settings, Strict Files
//!
//! An unrecognised style, fit policy, alignment or color degrades to its
//! documented default with a warning. A broken picture entry skips that
//! picture. Neither stops a large album halfway through.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resizing and encoding use the `image` crate; text is measured
//! and rasterised with `ab_glyph` through `imageproc`. No system libraries
//! are needed beyond a TrueType font to draw captions with.

pub mod album;
pub mod color;
pub mod compose;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
