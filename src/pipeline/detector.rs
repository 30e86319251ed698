//! The detector seam.
//!
//! The pipeline does not run a model. It consumes detections through
//! [`Detector`], which a model wrapper implements; [`RecordedDetector`]
//! replays detections saved to disk, and any suitable closure also works.

use std::path::Path;

use image::DynamicImage;

use crate::error::{CropmarkError, DetectionError};
use crate::ir::{io_json, io_pred_txt, RawDetection, Recording};

/// Produces raw detections for an image.
///
/// Implementations may block for as long as inference takes; the pipeline
/// neither retries nor times out the call.
pub trait Detector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<RawDetection>, DetectionError>;
}

impl<F> Detector for F
where
    F: Fn(&DynamicImage) -> Result<Vec<RawDetection>, DetectionError>,
{
    fn detect(&self, image: &DynamicImage) -> Result<Vec<RawDetection>, DetectionError> {
        self(image)
    }
}

/// Replays a [`Recording`] for whatever image it is given.
#[derive(Clone, Debug, Default)]
pub struct RecordedDetector {
    recording: Recording,
}

impl RecordedDetector {
    pub fn new(recording: Recording) -> Self {
        Self { recording }
    }

    /// Reads a recording from disk.
    ///
    /// `format` is `"json"`, `"txt"` (prediction rows), or `"auto"`, which
    /// picks by file extension and treats anything but `.json` as text.
    pub fn from_path(path: &Path, format: &str) -> Result<Self, CropmarkError> {
        let recording = match format {
            "json" => io_json::read_detections_json(path)?,
            "txt" | "pred" => io_pred_txt::read_pred_txt(path)?,
            "auto" => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    io_json::read_detections_json(path)?
                } else {
                    io_pred_txt::read_pred_txt(path)?
                }
            }
            other => {
                return Err(CropmarkError::UnsupportedFormat(format!(
                    "'{}' (supported: auto, json, txt)",
                    other
                )));
            }
        };
        Ok(Self::new(recording))
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }
}

impl Detector for RecordedDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<RawDetection>, DetectionError> {
        Ok(self
            .recording
            .to_raw_detections(image.width(), image.height()))
    }
}
