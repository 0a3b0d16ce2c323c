//! Album configuration: loading, default-filling and per-picture merging.
//!
//! An album is described by a single JSON file:
//!
//! ```json
//! {
//!     "name": "Holidays",
//!     "pictures": {
//!         "scotland.jpg": {"caption": "Shigiddy whoo!"},
//!         "japan.jpg": {"caption": "Zen", "style": "text"}
//!     },
//!     "configuration": {
//!         "size": [320, 320],
//!         "style": "polaroid",
//!         "color": "#000",
//!         "background-color": "#FFF"
//!     }
//! }
//! ```
//!
//! Picture file names are resolved relative to the directory holding the
//! JSON file. Pictures render in the order they appear in the file.
//!
//! ## Layers
//!
//! ```text
//! stock defaults  ←  "configuration"  ←  per-picture entry
//! ```
//!
//! Stock defaults fill every key the album's `configuration` leaves out; keys
//! that are present are never overwritten. Each picture then gets its own
//! [`EffectiveConfig`]: a fresh merge of the album settings with that
//! picture's overrides. The album settings themselves are never mutated.
//!
//! ## Settings
//!
//! | Key | Default | Meaning |
//! |---|---|---|
//! | `file-format` | `"jpg"` | output encoding and extension |
//! | `size` | `[320, 320]` | canvas size (polaroid uses the width only) |
//! | `padding` | `16` | caption inset (text) / bottom margin (polaroid) |
//! | `style` | `"text"` | `polaroid` or `text` |
//! | `picture-style` | `"contain"` | `contain`, `cover` or `stretch` |
//! | `picture-align` | `"center"` | `left`/`top`, `center`, `right`/`bottom` |
//! | `picture-background-color` | `"#000"` | polaroid picture slot fill |
//! | `font-size` | `12` | caption size in pixels |
//! | `font-name` | `"tahoma.ttf"` | font file, path or bare name |
//! | `color` | `"#000"` | caption color |
//! | `background-color` | `"#FFF"` | canvas fill |
//! | `watermark` | none | text stamped bottom-right |
//! | `quality` | `90` | JPEG/AVIF quality, 1–100 |
//!
//! Unknown keys are ignored so older album files keep working.

use crate::imaging::{Align, FitPolicy, Style};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Album file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Album path is not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Style settings shared by every picture of an album.
///
/// All fields have defaults; album files only specify what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AlbumDefaults {
    /// Output file format, also used as the file extension.
    pub file_format: String,
    /// Canvas `(width, height)`.
    pub size: (u32, u32),
    pub padding: u32,
    pub style: Style,
    /// Fit policy for the photo inside the polaroid slot.
    pub picture_style: FitPolicy,
    pub picture_align: Align,
    pub picture_background_color: String,
    pub font_size: u32,
    pub font_name: String,
    /// Caption color.
    pub color: String,
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
    pub quality: u32,
}

impl Default for AlbumDefaults {
    fn default() -> Self {
        Self {
            file_format: "jpg".to_string(),
            size: (320, 320),
            padding: 16,
            style: Style::Text,
            picture_style: FitPolicy::Contain,
            picture_align: Align::Center,
            picture_background_color: "#000".to_string(),
            font_size: 12,
            font_name: "tahoma.ttf".to_string(),
            color: "#000".to_string(),
            background_color: "#FFF".to_string(),
            watermark: None,
            quality: 90,
        }
    }
}

impl AlbumDefaults {
    /// Validate values that would make rendering impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(ConfigError::Validation(
                "size values must be non-zero".into(),
            ));
        }
        if self.font_size == 0 {
            return Err(ConfigError::Validation("font-size must be non-zero".into()));
        }
        Ok(())
    }
}

/// One entry of `pictures`: a caption plus any settings it overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureOverride {
    pub caption: String,
    /// Raw override keys (everything but `caption`).
    pub settings: Map<String, Value>,
}

impl PictureOverride {
    fn from_value(file: &str, value: Value) -> Result<Self, ConfigError> {
        let mut settings = match value {
            Value::Object(map) => map,
            // Shorthand: "a.jpg": "caption text"
            Value::String(caption) => {
                return Ok(Self {
                    caption,
                    settings: Map::new(),
                });
            }
            other => {
                return Err(ConfigError::Validation(format!(
                    "picture {file:?} must be an object, got {other}"
                )));
            }
        };
        let caption = match settings.remove("caption") {
            Some(Value::String(caption)) => caption,
            Some(other) => other.to_string(),
            None => {
                warn!("picture {file:?} has no caption");
                String::new()
            }
        };
        Ok(Self { caption, settings })
    }
}

/// Fully resolved settings for one picture.
///
/// Built fresh for every picture and discarded after it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub album_name: String,
    /// 0-based position in the album.
    pub index: usize,
    /// Source photo path.
    pub path: PathBuf,
    pub caption: String,
    pub settings: AlbumDefaults,
}

/// A loaded album description.
#[derive(Debug, Clone)]
pub struct AlbumConfig {
    pub name: String,
    /// Directory picture file names are resolved against.
    pub root: PathBuf,
    /// Pictures in file order: `(file name, entry)`.
    pub pictures: Vec<(String, PictureOverride)>,
    /// Album settings after default-filling, as a JSON object: the base
    /// layer for picture merges. Typed and validated per picture, so a bad
    /// album-level value fails each picture instead of the whole run.
    configuration_value: Value,
}

fn default_album_name() -> String {
    "Album".to_string()
}

#[derive(Deserialize)]
struct AlbumFile {
    #[serde(default = "default_album_name")]
    name: String,
    #[serde(default)]
    pictures: Map<String, Value>,
    #[serde(default)]
    configuration: Option<Value>,
}

/// Returns the stock default settings as a JSON object.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging album settings on top.
pub fn stock_defaults_value() -> Value {
    serde_json::to_value(AlbumDefaults::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Objects are merged key-by-key (overlay keys override base keys).
/// - Non-object values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_json(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => merge_json(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Deserialize merged settings and validate them.
fn resolve_settings(merged: Value) -> Result<AlbumDefaults, ConfigError> {
    let settings: AlbumDefaults = serde_json::from_value(merged)?;
    settings.validate()?;
    Ok(settings)
}

impl AlbumConfig {
    /// Build an album from an already parsed JSON document.
    pub fn from_value(value: Value, root: &Path) -> Result<Self, ConfigError> {
        let file: AlbumFile = serde_json::from_value(value)?;

        let configuration_value = match file.configuration {
            Some(user) => merge_json(stock_defaults_value(), user),
            None => stock_defaults_value(),
        };

        let pictures = file
            .pictures
            .into_iter()
            .map(|(name, entry)| {
                let entry = PictureOverride::from_value(&name, entry)?;
                Ok((name, entry))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            name: file.name,
            root: root.to_path_buf(),
            pictures,
            configuration_value,
        })
    }

    pub fn from_json_str(json: &str, root: &Path) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(json)?, root)
    }

    /// Default output directory: the album name, relative to the working directory.
    pub fn default_output_dir(&self) -> PathBuf {
        PathBuf::from(&self.name)
    }

    /// Album settings with stock defaults filled in.
    pub fn defaults(&self) -> Result<AlbumDefaults, ConfigError> {
        resolve_settings(self.configuration_value.clone())
    }

    /// Resolve the settings of the picture at `index`.
    ///
    /// Errors here concern that picture only (e.g. an override of the wrong
    /// type); the rest of the album is unaffected.
    pub fn effective(&self, index: usize) -> Result<EffectiveConfig, ConfigError> {
        let (file, entry) = self.pictures.get(index).ok_or_else(|| {
            ConfigError::Validation(format!(
                "picture index {index} out of range ({} pictures)",
                self.pictures.len()
            ))
        })?;

        let merged = merge_json(
            self.configuration_value.clone(),
            Value::Object(entry.settings.clone()),
        );
        let settings = resolve_settings(merged)?;

        Ok(EffectiveConfig {
            album_name: self.name.clone(),
            index,
            path: self.root.join(file),
            caption: entry.caption.clone(),
            settings,
        })
    }
}

/// Load an album description file.
///
/// A missing path or a path that is not a regular file is fatal, as is a file
/// that is not valid JSON.
pub fn load_album(path: &Path) -> Result<AlbumConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ConfigError::NotAFile(path.to_path_buf()));
    }

    let absolute = std::path::absolute(path)?;
    let root = absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    debug!("loading album {} (pictures in {})", absolute.display(), root.display());

    let content = std::fs::read_to_string(&absolute)?;
    AlbumConfig::from_json_str(&content, &root)
}
