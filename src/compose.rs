//! Compositor: one picture in, one finished image out.
//!
//! ## Steps
//!
//! ```text
//! 1. Canvas     polaroid: size from layout, filled with background-color
//!               text:     the source photo itself, at its natural size
//! 2. Photo      polaroid: slot filled with picture-background-color, photo
//!               fitted (contain/cover/stretch) and pasted
//! 3. Font       configured font → built-in font
//! 4. Caption    polaroid: wrapped to the text area width
//!               text:     drawn as written, one line per `\n`
//! 5. Watermark  optional, semi-transparent, bottom-right
//! 6. Flatten    transparency composited over background-color
//! 7. Encode     via the backend, to `<output dir>/<album> (<n>).<format>`
//! ```
//!
//! A covering photo larger than its slot is pasted without cropping; only the
//! canvas edges clip it.

use crate::album::AlbumContext;
use crate::color::parse_color;
use crate::config::{AlbumDefaults, ConfigError, EffectiveConfig};
use crate::imaging::{
    BackendError, CaptionFont, FitResult, FontError, ImageBackend, Layout, OutputFormat, Quality,
    Rect, SaveParams, Style, layout, resolve_fit,
};
use crate::naming::output_file_name;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Opacity of the watermark text, out of 255.
const WATERMARK_ALPHA: u8 = 96;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Source image not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Unsupported file format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Invalid picture settings: {0}")]
    Config(#[from] ConfigError),
    #[error("Caption font unavailable: {0}")]
    Font(#[from] FontError),
    #[error("Image processing failed: {0}")]
    Imaging(BackendError),
}

impl From<BackendError> for RenderError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotFound(path) => RenderError::SourceNotFound(path),
            other => RenderError::Imaging(other),
        }
    }
}

/// Render one picture to an opaque RGB image.
pub fn render(
    backend: &impl ImageBackend,
    ctx: &AlbumContext,
    config: &EffectiveConfig,
) -> Result<RgbImage, RenderError> {
    let settings = &config.settings;
    let photo = backend.open(&config.path)?;
    let background = parse_color(Some(&settings.background_color));
    let text_color = parse_color(Some(&settings.color));

    let (mut canvas, regions) = match settings.style {
        Style::Polaroid => compose_polaroid(&photo, settings, background),
        Style::Text => compose_text(photo, settings),
    };
    debug!(
        "{}: {:?} canvas {}x{}",
        config.path.display(),
        settings.style,
        canvas.width(),
        canvas.height()
    );

    let font =
        CaptionFont::load_or_default(&settings.font_name, settings.font_size, &ctx.album_dir)?;
    draw_caption(&mut canvas, &regions, &font, &config.caption, text_color, settings.padding);
    if let Some(mark) = settings.watermark.as_deref().filter(|m| !m.is_empty()) {
        let inset = regions.picture.map_or(settings.padding, |p| p.x0);
        stamp_watermark(&mut canvas, &font, mark, text_color, inset);
    }

    Ok(flatten(&canvas, background))
}

/// Render one picture and write it into the album's output directory.
///
/// Returns the path of the written file.
pub fn render_to_file(
    backend: &impl ImageBackend,
    ctx: &AlbumContext,
    config: &EffectiveConfig,
) -> Result<PathBuf, RenderError> {
    let settings = &config.settings;
    let format = OutputFormat::from_name(&settings.file_format)
        .ok_or_else(|| RenderError::UnsupportedFormat(settings.file_format.clone()))?;

    let image = render(backend, ctx, config)?;

    let output = ctx.output_dir.join(output_file_name(
        &config.album_name,
        config.index,
        &settings.file_format,
    ));
    backend.save(
        &image,
        &SaveParams {
            output: output.clone(),
            format,
            quality: Quality::new(settings.quality),
        },
    )?;
    Ok(output)
}

fn compose_polaroid(
    photo: &DynamicImage,
    settings: &AlbumDefaults,
    background: Rgba<u8>,
) -> (RgbaImage, Layout) {
    let regions = layout(Style::Polaroid, settings.size, settings.padding);
    let (width, height) = regions.canvas_size();
    let mut canvas = RgbaImage::from_pixel(width, height, background);

    if let Some(slot) = regions.picture.filter(|s| !s.is_empty()) {
        draw_filled_rect_mut(
            &mut canvas,
            imageproc::rect::Rect::at(slot.x0 as i32, slot.y0 as i32)
                .of_size(slot.width(), slot.height()),
            parse_color(Some(&settings.picture_background_color)),
        );

        let fit = resolve_fit(
            (photo.width(), photo.height()),
            slot,
            settings.picture_style,
            settings.picture_align,
        );
        if let Some((part, area)) = visible_part(photo, &fit, (width, height)) {
            imageops::overlay(&mut canvas, &part, area.x0 as i64, area.y0 as i64);
        }
    }

    (canvas, regions)
}

/// Where a fitted photo lands on the canvas, clipped to the canvas edges.
fn visible_area(fit: &FitResult, canvas: (u32, u32)) -> Option<Rect> {
    let x0 = fit.x.max(0);
    let y0 = fit.y.max(0);
    let x1 = (fit.x + fit.width as i64).min(canvas.0 as i64);
    let y1 = (fit.y + fit.height as i64).min(canvas.1 as i64);
    (x0 < x1 && y0 < y1).then(|| Rect::new(x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

/// Resize only the part of `photo` that ends up on the canvas.
///
/// A covering photo can be many times larger than its slot; the resized
/// buffer is bounded by the canvas instead.
fn visible_part(
    photo: &DynamicImage,
    fit: &FitResult,
    canvas: (u32, u32),
) -> Option<(RgbaImage, Rect)> {
    let (src_w, src_h) = (photo.width(), photo.height());
    if src_w == 0 || src_h == 0 {
        return None;
    }
    let area = visible_area(fit, canvas)?;

    // Visible span inside the fitted photo, mapped back to source pixels.
    let span = |offset: i64, len: u32, fitted: u32, src: u32| {
        let scale = src as f64 / fitted as f64;
        let start = ((offset as f64 * scale).floor() as u32).min(src - 1);
        let end = (((offset + len as i64) as f64 * scale).ceil() as u32).clamp(start + 1, src);
        (start, end - start)
    };
    let (sx, sw) = span(area.x0 as i64 - fit.x, area.width(), fit.width, src_w);
    let (sy, sh) = span(area.y0 as i64 - fit.y, area.height(), fit.height, src_h);

    let part = photo.crop_imm(sx, sy, sw, sh).to_rgba8();
    let resized = imageops::resize(&part, area.width(), area.height(), FilterType::Lanczos3);
    Some((resized, area))
}

fn compose_text(photo: DynamicImage, settings: &AlbumDefaults) -> (RgbaImage, Layout) {
    let canvas = photo.into_rgba8();
    let regions = layout(Style::Text, canvas.dimensions(), settings.padding);
    (canvas, regions)
}

fn draw_caption(
    canvas: &mut RgbaImage,
    regions: &Layout,
    font: &CaptionFont,
    caption: &str,
    color: Rgba<u8>,
    padding: u32,
) {
    if caption.trim().is_empty() {
        return;
    }
    match regions.text {
        Some(area) => {
            let lines: Vec<String> = caption
                .lines()
                .flat_map(|paragraph| font.wrap(paragraph, area.width()))
                .collect();
            font.draw_lines(canvas, color, area.x0 as i32, area.y0 as i32, &lines);
        }
        None => {
            let lines: Vec<&str> = caption.lines().collect();
            font.draw_lines(canvas, color, padding as i32, padding as i32, &lines);
        }
    }
}

/// Stamp `text` near the bottom-right corner, `inset` pixels from both edges.
fn stamp_watermark(
    canvas: &mut RgbaImage,
    font: &CaptionFont,
    text: &str,
    color: Rgba<u8>,
    inset: u32,
) {
    let text_width = font.measure(text).max(1);
    let line_height = font.line_height();
    let x = canvas.width().saturating_sub(text_width + inset);
    let y = canvas.height().saturating_sub(line_height + inset);

    let [r, g, b, _] = color.0;
    let mut layer = RgbaImage::from_pixel(text_width, line_height, Rgba([r, g, b, 0]));
    font.draw_lines(&mut layer, Rgba([r, g, b, WATERMARK_ALPHA]), 0, 0, &[text]);
    imageops::overlay(canvas, &layer, x as i64, y as i64);
}

/// Composite `canvas` over an opaque `background`, dropping the alpha channel.
pub fn flatten(canvas: &RgbaImage, background: Rgba<u8>) -> RgbImage {
    let [r, g, b, _] = background.0;
    let mut base = RgbaImage::from_pixel(canvas.width(), canvas.height(), Rgba([r, g, b, 255]));
    imageops::overlay(&mut base, canvas, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}
