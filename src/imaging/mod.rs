//! Image layout and I/O — pure Rust.
//!
//! | Concern | Module | Crate / function |
//! |---|---|---|
//! | **Regions** | [`layout`] | pure geometry |
//! | **Fit** | [`fit`] | pure geometry |
//! | **Captions** | [`text`] | `ab_glyph` metrics, `imageproc::drawing::draw_text_mut` |
//! | **Decode / encode** | [`rust_backend`] | `image` crate |
//!
//! The module is split into:
//! - **Calculations**: [`layout`] and [`fit`], pure functions (unit testable)
//! - **Parameters**: data structures describing a write
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Text**: wrapping and font handling

pub mod backend;
pub mod fit;
pub mod layout;
mod params;
pub mod rust_backend;
pub mod text;

pub use backend::{BackendError, ImageBackend};
pub use fit::{Align, FitPolicy, FitResult, Orientation, resolve as resolve_fit};
pub use layout::{Layout, Rect, Style, layout};
pub use params::{OutputFormat, Quality, SaveParams};
pub use rust_backend::RustBackend;
pub use text::{CaptionFont, FontError, wrap};
