//! Caption text: greedy line wrapping, font loading and drawing.
//!
//! Wrapping is independent of any font: [`wrap`] takes a measuring closure,
//! so tests can drive it with a fixed-width metric. [`CaptionFont`] provides
//! the real metric (via `ab_glyph`) and draws lines with `imageproc`.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// DejaVu Sans, used when the configured font cannot be loaded.
const BUILTIN_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Directories searched for a bare font file name such as `tahoma.ttf`.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

#[derive(Error, Debug)]
pub enum FontError {
    #[error("cannot read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid font file {}", .0.display())]
    Invalid(PathBuf),
    #[error("font {0:?} not found")]
    NotFound(String),
    #[error("built-in font is unreadable")]
    Builtin,
}

/// Greedy word wrap bounded by `max_width` pixels.
///
/// Words are split on single spaces (runs of spaces produce empty words that
/// are kept). Each word is tried against the current line; if the line plus
/// the word measures wider than `max_width`, the line is emitted and the word
/// starts the next one. A word wider than `max_width` on its own is never
/// split, and an empty line is never flushed, so an overlong first word
/// does not leave a blank line ahead of it. Emitted lines carry no trailing
/// space.
///
/// The last line is always emitted, so an empty caption yields one empty line.
pub fn wrap(text: &str, max_width: u32, measure: impl Fn(&str) -> u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = format!("{line}{word}");
        if measure(&candidate) > max_width && !line.is_empty() {
            lines.push(line.trim_end_matches(' ').to_string());
            line.clear();
        }
        line.push_str(word);
        line.push(' ');
    }

    lines.push(line.trim_end_matches(' ').to_string());
    lines
}

/// A loaded font at a fixed pixel size.
pub struct CaptionFont {
    font: FontArc,
    scale: PxScale,
    /// `None` for the built-in font.
    source: Option<PathBuf>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("source", &self.source)
            .field("size", &self.scale.y)
            .finish()
    }
}

impl CaptionFont {
    /// Load a TrueType/OpenType font file at `size` pixels.
    pub fn from_file(path: &Path, size: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font =
            FontArc::try_from_vec(data).map_err(|_| FontError::Invalid(path.to_path_buf()))?;
        Ok(Self {
            font,
            scale: PxScale::from(size as f32),
            source: Some(path.to_path_buf()),
        })
    }

    /// Resolve `name` as a path, then relative to `album_dir`, then in the
    /// system font directories.
    pub fn named(name: &str, size: u32, album_dir: &Path) -> Result<Self, FontError> {
        let mut last_error = None;
        for candidate in font_candidates(name, album_dir) {
            if !candidate.is_file() {
                continue;
            }
            match Self::from_file(&candidate, size) {
                Ok(font) => return Ok(font),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| FontError::NotFound(name.to_string())))
    }

    /// The font compiled into the binary.
    pub fn builtin(size: u32) -> Result<Self, FontError> {
        let font = FontArc::try_from_slice(BUILTIN_FONT).map_err(|_| FontError::Builtin)?;
        Ok(Self {
            font,
            scale: PxScale::from(size as f32),
            source: None,
        })
    }

    /// Load the configured font, falling back to the built-in one.
    pub fn load_or_default(name: &str, size: u32, album_dir: &Path) -> Result<Self, FontError> {
        match Self::named(name, size, album_dir) {
            Ok(font) => {
                debug!("using font {:?}", font.source);
                Ok(font)
            }
            Err(e) => {
                warn!("{e}, using built-in font");
                Self::builtin(size)
            }
        }
    }

    /// Rendered width of `text` in pixels.
    pub fn measure(&self, text: &str) -> u32 {
        text_size(self.scale, &self.font, text).0
    }

    /// Vertical distance between consecutive baselines.
    pub fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent() + scaled.line_gap())
            .ceil()
            .max(1.0) as u32
    }

    /// Wrap `text` to `max_width` using this font's metrics.
    pub fn wrap(&self, text: &str, max_width: u32) -> Vec<String> {
        wrap(text, max_width, |s| self.measure(s))
    }

    /// Draw `lines` top-down starting at `(x, y)`.
    pub fn draw_lines<S: AsRef<str>>(
        &self,
        canvas: &mut RgbaImage,
        color: Rgba<u8>,
        x: i32,
        y: i32,
        lines: &[S],
    ) {
        let step = self.line_height() as i32;
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.is_empty() {
                continue;
            }
            draw_text_mut(canvas, color, x, y + step * i as i32, self.scale, &self.font, line);
        }
    }
}

fn font_candidates(name: &str, album_dir: &Path) -> Vec<PathBuf> {
    let given = PathBuf::from(name);
    let mut candidates = vec![given.clone()];
    if given.is_relative() {
        candidates.push(album_dir.join(&given));
        candidates.extend(FONT_DIRS.iter().map(|dir| Path::new(dir).join(&given)));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is 10px wide.
    fn mono(s: &str) -> u32 {
        s.chars().count() as u32 * 10
    }

    // =========================================================================
    // wrap
    // =========================================================================

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("Hi there", 200, mono), vec!["Hi there"]);
    }

    #[test]
    fn wraps_at_width_boundary() {
        // "aaa bbb" = 70px fits in 70; adding " ccc" does not.
        assert_eq!(wrap("aaa bbb ccc", 70, mono), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn measure_sees_line_plus_word_without_trailing_space() {
        let seen = std::cell::RefCell::new(Vec::new());
        wrap("ab cd ef", 1000, |s| {
            seen.borrow_mut().push(s.to_string());
            mono(s)
        });
        assert_eq!(*seen.borrow(), vec!["ab", "ab cd", "ab cd ef"]);
    }

    #[test]
    fn overlong_word_is_not_split() {
        let lines = wrap("a incomprehensibilities b", 50, mono);
        assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn overlong_first_word_does_not_emit_blank_line() {
        let lines = wrap("incomprehensibilities ok", 50, mono);
        assert_eq!(lines, vec!["incomprehensibilities", "ok"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap("", 100, mono), vec![""]);
    }

    #[test]
    fn consecutive_spaces_are_not_collapsed() {
        assert_eq!(wrap("a  b", 1000, mono), vec!["a  b"]);
    }

    #[test]
    fn no_line_exceeds_width_unless_single_word() {
        let text = "the quick brown fox jumps over the lazy dog and keeps on running far away";
        for max in [60, 90, 120, 200] {
            for line in wrap(text, max, mono) {
                assert!(
                    mono(&line) <= max || !line.contains(' '),
                    "line {line:?} wider than {max}"
                );
            }
        }
    }

    #[test]
    fn wrapping_preserves_words_in_order() {
        let text = "one two three four five six seven";
        let lines = wrap(text, 110, mono);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
    }

    // =========================================================================
    // font resolution
    // =========================================================================

    #[test]
    fn candidates_include_album_dir_for_relative_names() {
        let c = font_candidates("fonts/caption.ttf", Path::new("/albums/trip"));
        assert_eq!(c[0], PathBuf::from("fonts/caption.ttf"));
        assert_eq!(c[1], PathBuf::from("/albums/trip/fonts/caption.ttf"));
        assert!(c.len() > 2);
    }

    #[test]
    fn candidates_for_absolute_path_is_just_the_path() {
        let c = font_candidates("/opt/fonts/a.ttf", Path::new("/albums"));
        assert_eq!(c, vec![PathBuf::from("/opt/fonts/a.ttf")]);
    }

    #[test]
    fn missing_font_reports_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = CaptionFont::named("no-such-font-xyz.ttf", 12, tmp.path()).unwrap_err();
        assert!(matches!(err, FontError::NotFound(ref n) if n == "no-such-font-xyz.ttf"));
    }

    #[test]
    fn garbage_font_file_is_invalid() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let err = CaptionFont::from_file(&path, 12).unwrap_err();
        assert!(matches!(err, FontError::Invalid(_)));
    }

    #[test]
    fn unknown_font_falls_back_to_builtin() {
        let tmp = tempfile::TempDir::new().unwrap();
        let font = CaptionFont::load_or_default("no-such-font-xyz.ttf", 14, tmp.path()).unwrap();
        assert!(font.source.is_none());
        assert!(font.line_height() > 0);
        assert!(font.measure("Hello") > 0);
    }

    #[test]
    fn font_file_in_album_dir_is_preferred() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("caption.ttf"), BUILTIN_FONT).unwrap();
        let font = CaptionFont::load_or_default("caption.ttf", 14, tmp.path()).unwrap();
        assert_eq!(font.source, Some(tmp.path().join("caption.ttf")));
    }

    #[test]
    fn builtin_metrics_scale_with_size() {
        let small = CaptionFont::builtin(12).unwrap();
        let large = CaptionFont::builtin(24).unwrap();
        assert!(large.measure("Hello there") > small.measure("Hello there"));
        assert!(large.line_height() > small.line_height());
    }

    #[test]
    fn builtin_wrap_respects_width() {
        let font = CaptionFont::builtin(12).unwrap();
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let lines = font.wrap(text, 100);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(font.measure(line) <= 100 || !line.contains(' '), "{line:?}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn draw_lines_stacks_by_line_height() {
        let font = CaptionFont::builtin(12).unwrap();
        let lh = font.line_height();
        let mut canvas = RgbaImage::from_pixel(100, 3 * lh, Rgba([255, 255, 255, 255]));
        font.draw_lines(&mut canvas, Rgba([0, 0, 0, 255]), 0, 0, &["Hi", "", "Yo"]);

        let inked = |band: u32| {
            (band * lh..(band + 1) * lh)
                .any(|y| (0..100).any(|x| canvas.get_pixel(x, y)[0] < 128))
        };
        assert!(inked(0));
        // Empty lines keep their slot but draw nothing.
        assert!(!inked(1));
        assert!(inked(2));
    }
}
