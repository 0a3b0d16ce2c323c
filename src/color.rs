//! Color specification parsing.
//!
//! Album files describe colors the way a stylesheet would. Three grammars are
//! recognised:
//!
//! | Form | Example | Notes |
//! |---|---|---|
//! | `#RGB` | `#17B` | each digit duplicated → `#1177BB` |
//! | `#RRGGBB` | `#1A2B3C` | one byte per channel |
//! | `rgb(r, g, b)` | `rgb(10, 20, 30)` | decimal channels, whitespace ignored |
//!
//! Anything else is malformed. A malformed color never aborts a render: the
//! lenient [`parse_color`] logs a warning and returns opaque black.

use image::Rgba;
use thiserror::Error;
use tracing::warn;

/// Opaque black, the fallback for anything unparsable.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("malformed color specification: {0:?}")]
    Malformed(String),
}

/// Parse a color specification, falling back to opaque black on error.
///
/// `None` (no color configured) also yields black, silently.
pub fn parse_color(input: Option<&str>) -> Rgba<u8> {
    let Some(input) = input else {
        return BLACK;
    };
    match try_parse_color(input) {
        Ok(color) => color,
        Err(e) => {
            warn!("{e}, using black");
            BLACK
        }
    }
}

/// Strict variant of [`parse_color`]. Always returns an opaque color.
pub fn try_parse_color(input: &str) -> Result<Rgba<u8>, ColorError> {
    let malformed = || ColorError::Malformed(input.to_string());

    if let Some(hex) = input.strip_prefix('#') {
        let expanded;
        let hex = match hex.len() {
            3 => {
                expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
                expanded.as_str()
            }
            6 => hex,
            _ => return Err(malformed()),
        };
        // from_str_radix accepts a leading '+', so reject non-hex digits up front
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
        return Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]));
    }

    if let Some(body) = input
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = body.split(',').collect();
        if parts.len() != 3 {
            return Err(malformed());
        }
        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.trim().parse::<u8>().map_err(|_| malformed())?;
        }
        let [r, g, b] = channels;
        return Ok(Rgba([r, g, b, 255]));
    }

    Err(malformed())
}
