//! Pipeline configuration.
//!
//! Everything the pipeline needs besides the image and its detections is
//! loaded once into a [`PipelineConfig`] and never changed afterwards. It can
//! be built in code or read from a YAML file:
//!
//! ```yaml
//! classes: data.yaml          # data.yaml / classes.txt path, or inline names
//! links:                      # optional, defaults to the crop disease table
//!   entries:
//!     - { class: "TYLCV", url: "http://example.com/tylcv.html" }
//!   fallback: "http://example.com/other.html"
//! style:
//!   stroke_color: [255, 0, 0]
//!   stroke_width: 2
//!   font: fonts/Label.ttf     # optional, overrides the bundled font
//!   font_size: 11
//! jpeg_quality: 75
//! dedup: first_seen           # or highest_confidence
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use image::Rgb;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{ClassCatalog, DataYamlNames};
use crate::error::CropmarkError;
use crate::links::ClassLinkTable;
use crate::pipeline::annotate::{
    AnnotationStyle, DEFAULT_FONT_SIZE, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH,
};
use crate::pipeline::dedup::DedupPolicy;
use crate::pipeline::encode::{check_quality, DEFAULT_JPEG_QUALITY};

/// Immutable configuration shared by every pipeline invocation.
#[derive(Debug)]
pub struct PipelineConfig {
    pub catalog: ClassCatalog,
    pub links: ClassLinkTable,
    pub style: AnnotationStyle,
    pub jpeg_quality: u8,
    pub dedup: DedupPolicy,
}

impl PipelineConfig {
    /// Creates a configuration with the default style (bundled label font),
    /// JPEG quality, and dedup policy.
    pub fn new(catalog: ClassCatalog, links: ClassLinkTable) -> Self {
        Self {
            catalog,
            links,
            style: AnnotationStyle::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            dedup: DedupPolicy::default(),
        }
    }

    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Sets the JPEG quality, which must be in `1..=100`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Result<Self, CropmarkError> {
        self.jpeg_quality = check_quality(quality)?;
        Ok(self)
    }

    /// Reads a YAML configuration file.
    pub fn from_path(path: &Path) -> Result<Self, CropmarkError> {
        let data = fs::read_to_string(path).map_err(CropmarkError::Io)?;
        let file = parse_config_file(&data, path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        file.into_config(base_dir)
    }

    /// Parses YAML configuration from a string, resolving relative paths
    /// against `base_dir`.
    pub fn from_yaml_str(yaml: &str, base_dir: &Path) -> Result<Self, CropmarkError> {
        parse_config_file(yaml, Path::new("<string>"))?.into_config(base_dir)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    classes: ClassesSource,
    #[serde(default)]
    links: Option<ClassLinkTable>,
    #[serde(default)]
    style: StyleFile,
    #[serde(default = "default_jpeg_quality")]
    jpeg_quality: u8,
    #[serde(default)]
    dedup: DedupPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassesSource {
    Path(PathBuf),
    Inline(DataYamlNames),
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StyleFile {
    stroke_color: [u8; 3],
    stroke_width: u32,
    font: Option<PathBuf>,
    font_size: f32,
}

impl Default for StyleFile {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR.0,
            stroke_width: DEFAULT_STROKE_WIDTH,
            font: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn parse_config_file(yaml: &str, path: &Path) -> Result<ConfigFile, CropmarkError> {
    serde_yaml::from_str(yaml).map_err(|source| CropmarkError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fuzz-only entrypoint for configuration parsing (no file access).
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_config(input: &str) -> Result<(), CropmarkError> {
    let _ = parse_config_file(input, Path::new("<fuzz>"))?;
    Ok(())
}

impl ConfigFile {
    fn into_config(self, base_dir: &Path) -> Result<PipelineConfig, CropmarkError> {
        let catalog = match self.classes {
            ClassesSource::Path(path) => ClassCatalog::from_path(&resolve(base_dir, &path))?,
            ClassesSource::Inline(names) => names.into_catalog()?,
        };
        if catalog.is_empty() {
            return Err(CropmarkError::ConfigInvalid(
                "class catalog is empty".to_string(),
            ));
        }

        let links = match self.links {
            Some(links) => links,
            None => {
                debug!("No link table configured, using the crop disease table");
                ClassLinkTable::crop_disease()
            }
        };

        let style = self.style.into_style(base_dir)?;
        let jpeg_quality = check_quality(self.jpeg_quality)?;

        Ok(PipelineConfig {
            catalog,
            links,
            style,
            jpeg_quality,
            dedup: self.dedup,
        })
    }
}

impl StyleFile {
    fn into_style(self, base_dir: &Path) -> Result<AnnotationStyle, CropmarkError> {
        if self.stroke_width == 0 {
            return Err(CropmarkError::ConfigInvalid(
                "style.stroke_width must be at least 1".to_string(),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(CropmarkError::ConfigInvalid(format!(
                "style.font_size must be positive, got {}",
                self.font_size
            )));
        }

        let style = AnnotationStyle {
            stroke_color: Rgb(self.stroke_color),
            stroke_width: self.stroke_width,
            font_size: self.font_size,
            ..AnnotationStyle::default()
        };

        match self.font {
            Some(font) => style.with_font_path(&resolve(base_dir, &font)),
            None => Ok(style),
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
