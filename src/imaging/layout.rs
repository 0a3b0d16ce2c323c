//! Canvas layout: named rectangles for each rendering style.
//!
//! Pure geometry, no pixels. The compositor asks for a [`Layout`] and then
//! paints into the rectangles it describes.
//!
//! ## Polaroid proportions
//!
//! A polaroid frame is derived entirely from its width `W`:
//!
//! ```text
//! ┌──────────────────────┐  ─┬─ 0
//! │ pad                  │   │
//! │   ┌──────────────┐   │   │
//! │   │   picture    │   │   │  picture height = round(W × 0.89)
//! │   └──────────────┘   │   │
//! │ pad                  │   │
//! │   ┌──────────────┐   │   │
//! │   │    text      │   │   │
//! │   └──────────────┘   │   │
//! │ padding              │   │
//! └──────────────────────┘  ─┴─ H = round(W × 1.22)
//!          pad = round(W × 0.06)
//! ```
//!
//! The frame pad is a fixed ratio of the width; the configured `padding` only
//! sets the bottom margin under the text area.

use serde::{Deserialize, Serialize};
use tracing::warn;

const POLAROID_HEIGHT_RATIO: f64 = 1.22;
const POLAROID_PAD_RATIO: f64 = 0.06;
const POLAROID_PICTURE_RATIO: f64 = 0.89;

/// Rendering style of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    /// Framed photo with the caption underneath.
    Polaroid,
    /// Caption drawn straight over the photo.
    #[default]
    Text,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Polaroid => "polaroid",
            Style::Text => "text",
        }
    }

    /// Parse a style name. Unknown names fall back to [`Style::Text`] with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "polaroid" => Style::Polaroid,
            "text" => Style::Text,
            other => {
                warn!("unrecognized style {other:?}, falling back to \"text\"");
                Style::Text
            }
        }
    }
}

impl From<String> for Style {
    fn from(name: String) -> Self {
        Style::from_name(&name)
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.as_str().to_string()
    }
}

/// Axis-aligned box `[x0, x1) × [y0, y1)` in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// A rect is usable only when it has positive area.
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Regions for one picture.
///
/// `image` is the whole canvas. `picture` and `text` only exist for styles
/// that reserve dedicated slots for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub image: Rect,
    pub picture: Option<Rect>,
    pub text: Option<Rect>,
}

impl Layout {
    /// Canvas dimensions `(width, height)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

fn ratio(width: u32, r: f64) -> u32 {
    (width as f64 * r).round() as u32
}

/// Compute the regions for `style` on a canvas of `size` with the given `padding`.
pub fn layout(style: Style, size: (u32, u32), padding: u32) -> Layout {
    match style {
        Style::Polaroid => polaroid(size.0, padding),
        Style::Text => Layout {
            image: Rect::new(0, 0, size.0, size.1),
            picture: None,
            text: None,
        },
    }
}

fn polaroid(width: u32, padding: u32) -> Layout {
    let height = ratio(width, POLAROID_HEIGHT_RATIO);
    let pad = ratio(width, POLAROID_PAD_RATIO);
    let picture_height = ratio(width, POLAROID_PICTURE_RATIO);
    let right = width.saturating_sub(pad);

    let picture = Rect::new(pad, pad, right, pad + picture_height);
    let text_top = 2 * pad + picture_height;
    let text_bottom = height.saturating_sub(padding).max(text_top);

    Layout {
        image: Rect::new(0, 0, width, height),
        picture: Some(picture),
        text: Some(Rect::new(pad, text_top, right, text_bottom)),
    }
}
