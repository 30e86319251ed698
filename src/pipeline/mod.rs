//! Detection post-processing and annotation.
//!
//! [`Pipeline::process`] runs the stages in order:
//!
//! 1. name each raw detection through the class catalog (unknown index or a
//!    malformed row fails the whole invocation),
//! 2. keep one detection per class name ([`dedup`]),
//! 3. clip boxes to the image and drop degenerate ones ([`geometry`]),
//! 4. draw survivors onto a working copy ([`annotate`]),
//! 5. attach each survivor's reference link,
//! 6. encode the working copy ([`encode`]).
//!
//! A [`Pipeline`] is cheap to clone and safe to share across threads; every
//! invocation gets its own working copy and touches nothing else mutable.

pub mod annotate;
pub mod dedup;
pub mod detector;
pub mod encode;
pub mod geometry;
mod report;

pub use annotate::{annotate, AnnotationStyle};
pub use dedup::{dedup_by_class, DedupPolicy};
pub use detector::{Detector, RecordedDetector};
pub use encode::{encode_image, EncodedImage};
pub use geometry::{validate_box, GeometryRejection};
pub use report::{PipelineOutput, PipelineStats};

use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{CropmarkError, DetectionError};
use crate::ir::{AnnotatedDetection, Detection, RawDetection, ValidatedDetection};

/// The configured post-processing pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: Arc<PipelineConfig>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decodes `image_bytes`, runs `detector` on the image, then [`process`](Self::process).
    ///
    /// Detector errors are returned as-is.
    pub fn run(
        &self,
        image_bytes: &[u8],
        detector: &dyn Detector,
    ) -> Result<PipelineOutput, CropmarkError> {
        let image = decode(image_bytes)?;
        let raw = detector.detect(&image)?;
        self.process(&image, &raw)
    }

    /// Decodes `image_bytes` and runs [`process`](Self::process).
    pub fn process_bytes(
        &self,
        image_bytes: &[u8],
        raw: &[RawDetection],
    ) -> Result<PipelineOutput, CropmarkError> {
        let image = decode(image_bytes)?;
        self.process(&image, raw)
    }

    /// Post-processes `raw` for `image` and returns the annotated, encoded
    /// image with the surviving detections. `image` is not modified.
    ///
    /// # Errors
    /// [`DetectionError`] if a row is malformed or names an unknown class,
    /// [`EncodingError`](crate::error::EncodingError) if the annotated image
    /// cannot be encoded. Nothing is returned on failure.
    pub fn process(
        &self,
        image: &DynamicImage,
        raw: &[RawDetection],
    ) -> Result<PipelineOutput, CropmarkError> {
        let (width, height) = (image.width(), image.height());

        let named = self.name_detections(raw)?;
        let unique = dedup_by_class(named, self.config.dedup);
        let duplicates = raw.len() - unique.len();

        let validated = validate_all(unique, width, height);
        let rejected = raw.len() - duplicates - validated.len();

        let annotated_image = annotate(image, &validated, &self.config.style);

        let detections: Vec<AnnotatedDetection> = validated
            .into_iter()
            .map(|detection| {
                let link = self.config.links.resolve(&detection.class_name).to_string();
                AnnotatedDetection::new(detection, link)
            })
            .collect();

        let encoded = encode_image(&annotated_image, self.config.jpeg_quality)?;

        info!(
            "Annotated {}x{} image: kept {} of {} detection(s)",
            width,
            height,
            detections.len(),
            raw.len()
        );

        Ok(PipelineOutput {
            image: encoded,
            detections,
            stats: PipelineStats {
                raw: raw.len(),
                duplicates,
                rejected,
            },
        })
    }

    /// Checks each raw row and resolves its class name, in input order.
    pub fn name_detections(&self, raw: &[RawDetection]) -> Result<Vec<Detection>, DetectionError> {
        raw.iter()
            .enumerate()
            .map(|(row, detection)| {
                check_row(row, detection)?;
                let class_name = self.config.catalog.lookup(detection.class_index)?;
                Ok(Detection::new(
                    class_name,
                    detection.confidence,
                    detection.bbox,
                ))
            })
            .collect()
    }
}

fn decode(image_bytes: &[u8]) -> Result<DynamicImage, DetectionError> {
    image::load_from_memory(image_bytes).map_err(DetectionError::ImageDecode)
}

fn check_row(row: usize, detection: &RawDetection) -> Result<(), DetectionError> {
    if !detection.bbox.is_finite() {
        return Err(DetectionError::MalformedRow {
            row,
            message: format!("non-finite box {:?}", detection.bbox.to_array()),
        });
    }
    if !(0.0..=1.0).contains(&detection.confidence) {
        return Err(DetectionError::MalformedRow {
            row,
            message: format!("confidence {} outside [0, 1]", detection.confidence),
        });
    }
    Ok(())
}

fn validate_all(detections: Vec<Detection>, width: u32, height: u32) -> Vec<ValidatedDetection> {
    detections
        .into_iter()
        .filter_map(
            |detection| match validate_box(&detection.bbox, width, height) {
                Ok(bbox) => Some(ValidatedDetection {
                    class_name: detection.class_name,
                    confidence: detection.confidence,
                    bbox,
                }),
                Err(reason) => {
                    debug!(
                        class_name = %detection.class_name,
                        "Dropping box {:?}: {}",
                        detection.bbox.to_array(),
                        reason
                    );
                    None
                }
            },
        )
        .collect()
}
