//! Album driver: renders every picture of an album, in file order.
//!
//! A picture that fails (missing source, bad override, unsupported format,
//! undecodable file) is logged, recorded as skipped, and the driver moves on.
//! Nothing here aborts the album once it has been loaded.

use crate::compose::{RenderError, render_to_file};
use crate::config::AlbumConfig;
use crate::imaging::{ImageBackend, RustBackend};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Album-wide values shared by every picture render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumContext {
    pub name: String,
    /// Directory holding the album file; picture paths and fonts resolve here.
    pub album_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AlbumContext {
    /// `output_dir` defaults to the album name, relative to the working directory.
    pub fn new(album: &AlbumConfig, output_dir: Option<&Path>) -> Self {
        Self {
            name: album.name.clone(),
            album_dir: album.root.clone(),
            output_dir: output_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(|| album.default_output_dir()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureOutcome {
    Rendered(PathBuf),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureReport {
    /// 0-based position in the album file.
    pub index: usize,
    pub file: String,
    pub caption: String,
    pub outcome: PictureOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumReport {
    pub name: String,
    pub output_dir: PathBuf,
    pub pictures: Vec<PictureReport>,
}

impl AlbumReport {
    pub fn rendered(&self) -> usize {
        self.pictures
            .iter()
            .filter(|p| matches!(p.outcome, PictureOutcome::Rendered(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.pictures.len() - self.rendered()
    }
}

/// Render the album with the production backend.
pub fn generate(album: &AlbumConfig, output_dir: Option<&Path>) -> AlbumReport {
    let ctx = AlbumContext::new(album, output_dir);
    generate_with_backend(&RustBackend::new(), album, &ctx)
}

pub fn generate_with_backend(
    backend: &impl ImageBackend,
    album: &AlbumConfig,
    ctx: &AlbumContext,
) -> AlbumReport {
    info!(
        "Rendering {} ({} pictures) into {}",
        ctx.name,
        album.pictures.len(),
        ctx.output_dir.display()
    );

    let pictures = album
        .pictures
        .iter()
        .enumerate()
        .map(|(index, (file, entry))| {
            let outcome = match album
                .effective(index)
                .map_err(RenderError::from)
                .and_then(|config| render_to_file(backend, ctx, &config))
            {
                Ok(path) => {
                    info!("{} → {}", file, path.display());
                    PictureOutcome::Rendered(path)
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file, e);
                    PictureOutcome::Skipped(e.to_string())
                }
            };
            PictureReport {
                index,
                file: file.clone(),
                caption: entry.caption.clone(),
                outcome,
            }
        })
        .collect();

    AlbumReport {
        name: ctx.name.clone(),
        output_dir: ctx.output_dir.clone(),
        pictures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    fn album(json: &str) -> AlbumConfig {
        AlbumConfig::from_json_str(json, Path::new("/albums/trip")).unwrap()
    }

    fn ctx(album: &AlbumConfig) -> AlbumContext {
        AlbumContext::new(album, Some(Path::new("/out")))
    }

    const TRIP: &str = r#"{
        "name": "Trip",
        "pictures": {
            "a.jpg": {"caption": ""},
            "b.jpg": {"caption": ""},
            "c.jpg": {"caption": ""}
        },
        "configuration": {"file-format": "png"}
    }"#;

    // =========================================================================
    // AlbumContext
    // =========================================================================

    #[test]
    fn context_defaults_output_dir_to_album_name() {
        let album = album(TRIP);
        let ctx = AlbumContext::new(&album, None);
        assert_eq!(ctx.output_dir, PathBuf::from("Trip"));
        assert_eq!(ctx.album_dir, PathBuf::from("/albums/trip"));
    }

    #[test]
    fn context_uses_explicit_output_dir() {
        let album = album(TRIP);
        assert_eq!(ctx(&album).output_dir, PathBuf::from("/out"));
    }

    // =========================================================================
    // Driver
    // =========================================================================

    #[test]
    fn renders_every_picture_in_file_order() {
        let album = album(TRIP);
        let backend = MockBackend::new();
        let report = generate_with_backend(&backend, &album, &ctx(&album));

        let files: Vec<&str> = report.pictures.iter().map(|p| p.file.as_str()).collect();
        assert_eq!(files, ["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(
            backend.saved_outputs(),
            [
                "/out/Trip (1).png",
                "/out/Trip (2).png",
                "/out/Trip (3).png"
            ]
        );
        assert_eq!(report.rendered(), 3);
        assert_eq!(report.skipped(), 0);
    }

    #[test]
    fn missing_picture_is_skipped_and_the_rest_rendered() {
        let album = album(TRIP);
        let backend = MockBackend::new().with_missing("/albums/trip/b.jpg");
        let report = generate_with_backend(&backend, &album, &ctx(&album));

        assert!(matches!(report.pictures[1].outcome, PictureOutcome::Skipped(_)));
        assert_eq!(
            report.pictures[2].outcome,
            PictureOutcome::Rendered(PathBuf::from("/out/Trip (3).png"))
        );
        assert_eq!(report.rendered(), 2);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn bad_override_only_skips_that_picture() {
        let album = album(
            r#"{
                "name": "Trip",
                "pictures": {
                    "a.jpg": {"caption": "", "size": "huge"},
                    "b.jpg": {"caption": ""}
                },
                "configuration": {"file-format": "png"}
            }"#,
        );
        let backend = MockBackend::new();
        let report = generate_with_backend(&backend, &album, &ctx(&album));

        assert!(matches!(report.pictures[0].outcome, PictureOutcome::Skipped(_)));
        // Index in the name is the album position, not the count of rendered files.
        assert_eq!(backend.saved_outputs(), ["/out/Trip (2).png"]);
    }

    #[test]
    fn bad_album_setting_skips_pictures_instead_of_aborting() {
        let album = album(
            r#"{
                "name": "Trip",
                "pictures": {
                    "a.jpg": {"caption": ""},
                    "b.jpg": {"caption": "", "padding": 8}
                },
                "configuration": {"file-format": "png", "padding": "wide"}
            }"#,
        );
        let backend = MockBackend::new();
        let report = generate_with_backend(&backend, &album, &ctx(&album));

        assert!(matches!(report.pictures[0].outcome, PictureOutcome::Skipped(_)));
        assert_eq!(backend.saved_outputs(), ["/out/Trip (2).png"]);
    }

    #[test]
    fn unsupported_format_skips_without_decoding() {
        let album = album(
            r#"{"name": "Trip", "pictures": {"a.jpg": {"caption": "", "file-format": "xyz"}}}"#,
        );
        let backend = MockBackend::new();
        let report = generate_with_backend(&backend, &album, &ctx(&album));

        match &report.pictures[0].outcome {
            PictureOutcome::Skipped(reason) => assert!(reason.contains("xyz")),
            other => panic!("expected skip, got {other:?}"),
        }
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn per_picture_override_reaches_the_encoder() {
        let album = album(
            r#"{
                "name": "Trip",
                "pictures": {
                    "a.jpg": {"caption": ""},
                    "b.jpg": {"caption": "", "file-format": "jpg", "quality": 40}
                },
                "configuration": {"file-format": "png"}
            }"#,
        );
        let backend = MockBackend::new();
        generate_with_backend(&backend, &album, &ctx(&album));

        let saves: Vec<(String, u32)> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Save {
                    output, quality, ..
                } => Some((output, quality)),
                _ => None,
            })
            .collect();
        assert_eq!(
            saves,
            [
                ("/out/Trip (1).png".to_string(), 90),
                ("/out/Trip (2).jpg".to_string(), 40)
            ]
        );
    }

    #[test]
    fn captions_are_carried_into_the_report() {
        let album = album(
            r#"{"name": "Trip", "pictures": {"a.jpg": "Hi there"}, "configuration": {"file-format": "png"}}"#,
        );
        let backend = MockBackend::new().with_missing("/albums/trip/a.jpg");
        let report = generate_with_backend(&backend, &album, &ctx(&album));
        assert_eq!(report.pictures[0].caption, "Hi there");
    }

    #[test]
    fn empty_album_produces_empty_report() {
        let album = album(r#"{"name": "Empty"}"#);
        let report = generate_with_backend(&MockBackend::new(), &album, &ctx(&album));
        assert!(report.pictures.is_empty());
        assert_eq!(report.rendered(), 0);
    }
}
