//! Fitting a photo into a slot: destination size and offset.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! The fit works in two steps. First an [`Orientation`] picks which slot axis
//! the photo is pinned to; that gives a unit scale pair `(u, v)`:
//!
//! | Orientation | `(u, v)` |
//! |---|---|
//! | `Horizontal` | `(1, h / w)` |
//! | `Vertical` | `(w / h, 1)` |
//!
//! and the destination size is `(floor(slot_w × u), floor(slot_h × v))`.
//! Then the alignment positions the photo along the other (cross) axis. The
//! pinned axis always starts at the slot origin.
//!
//! `Cover` picks the opposite orientation from `Contain`, so the photo
//! overflows the slot on one axis instead of leaving a gap. Nothing is
//! cropped; the overflow is painted as is.

use super::layout::Rect;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a photo is scaled into its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FitPolicy {
    /// Keep aspect ratio, fit inside.
    #[default]
    Contain,
    /// Keep aspect ratio, fill the slot (may overflow).
    Cover,
    /// Ignore aspect ratio, match the slot exactly.
    Stretch,
}

impl FitPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FitPolicy::Contain => "contain",
            FitPolicy::Cover => "cover",
            FitPolicy::Stretch => "stretch",
        }
    }

    /// Parse a policy name. Unknown names fall back to [`FitPolicy::Contain`] with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "contain" => FitPolicy::Contain,
            "cover" => FitPolicy::Cover,
            "stretch" => FitPolicy::Stretch,
            other => {
                warn!("unrecognized picture-style {other:?}, falling back to \"contain\"");
                FitPolicy::Contain
            }
        }
    }
}

impl From<String> for FitPolicy {
    fn from(name: String) -> Self {
        FitPolicy::from_name(&name)
    }
}

impl From<FitPolicy> for String {
    fn from(policy: FitPolicy) -> Self {
        policy.as_str().to_string()
    }
}

/// Where the photo sits on the cross axis of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Align {
    /// Left or top.
    Start,
    #[default]
    Center,
    /// Right or bottom.
    End,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
        }
    }

    /// Parse an alignment name. Unknown names fall back to [`Align::Center`] with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" | "top" | "start" => Align::Start,
            "center" | "middle" => Align::Center,
            "right" | "bottom" | "end" => Align::End,
            other => {
                warn!("unrecognized picture-align {other:?}, falling back to \"center\"");
                Align::Center
            }
        }
    }
}

impl From<String> for Align {
    fn from(name: String) -> Self {
        Align::from_name(&name)
    }
}

impl From<Align> for String {
    fn from(align: Align) -> Self {
        align.as_str().to_string()
    }
}

/// Which slot axis the photo is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Width fills the slot; height follows the aspect ratio.
    Horizontal,
    /// Height fills the slot; width follows the aspect ratio.
    Vertical,
}

/// Destination of a fitted photo, in canvas pixels.
///
/// Offsets are signed: a covering photo centered on its overflowing axis
/// starts before the slot origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitResult {
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
}

/// Pick the pinned axis for a photo of `natural` size under `policy`.
///
/// `Stretch` pins both axes; it reports `Horizontal` and scales `(1, 1)`.
pub fn orientation(natural: (u32, u32), policy: FitPolicy) -> Orientation {
    let landscape = natural.0 > natural.1;
    match policy {
        FitPolicy::Contain if landscape => Orientation::Horizontal,
        FitPolicy::Contain => Orientation::Vertical,
        FitPolicy::Cover if landscape => Orientation::Vertical,
        FitPolicy::Cover => Orientation::Horizontal,
        FitPolicy::Stretch => Orientation::Horizontal,
    }
}

/// Unit scale pair `(u, v)` applied to the slot extents.
fn unit_scale(natural: (u32, u32), policy: FitPolicy) -> (f64, f64) {
    let (w, h) = natural;
    if policy == FitPolicy::Stretch || w == 0 || h == 0 {
        return (1.0, 1.0);
    }
    match orientation(natural, policy) {
        Orientation::Horizontal => (1.0, h as f64 / w as f64),
        Orientation::Vertical => (w as f64 / h as f64, 1.0),
    }
}

/// Offset of an extent of `dest` inside `[origin, origin + extent)`.
fn align_offset(origin: u32, extent: u32, dest: u32, align: Align) -> i64 {
    let origin = origin as i64;
    let gap = extent as i64 - dest as i64;
    match align {
        Align::Start => origin,
        Align::Center => origin + gap.div_euclid(2),
        Align::End => origin + gap,
    }
}

/// Resolve the destination size and offset of a photo inside `target`.
///
/// # Examples
/// ```
/// # use caption_album::imaging::{Align, FitPolicy, Rect, resolve_fit};
/// // A 2:1 landscape contained in a 400×400 slot, centered vertically.
/// let fit = resolve_fit((1600, 800), Rect::new(0, 0, 400, 400), FitPolicy::Contain, Align::Center);
/// assert_eq!((fit.width, fit.height, fit.x, fit.y), (400, 200, 0, 100));
/// ```
pub fn resolve(natural: (u32, u32), target: Rect, policy: FitPolicy, align: Align) -> FitResult {
    let (slot_w, slot_h) = (target.width(), target.height());
    let (u, v) = unit_scale(natural, policy);
    let width = ((slot_w as f64 * u).floor() as u32).max(1);
    let height = ((slot_h as f64 * v).floor() as u32).max(1);

    let (x, y) = match orientation(natural, policy) {
        Orientation::Horizontal => (
            target.x0 as i64,
            align_offset(target.y0, slot_h, height, align),
        ),
        Orientation::Vertical => (
            align_offset(target.x0, slot_w, width, align),
            target.y0 as i64,
        ),
    };

    FitResult {
        width,
        height,
        x,
        y,
    }
}
