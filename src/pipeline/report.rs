//! Pipeline output and its human-readable rendering.

use std::fmt;

use serde::Serialize;

use super::encode::EncodedImage;
use crate::ir::AnnotatedDetection;

/// Counts of what each stage removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Rows the detector produced.
    pub raw: usize,

    /// Rows dropped because their class was already represented.
    pub duplicates: usize,

    /// Rows dropped by geometry validation.
    pub rejected: usize,
}

/// Result of one pipeline invocation.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineOutput {
    /// The annotated working copy, JPEG + base64.
    pub image: EncodedImage,

    /// Surviving detections, in survival order, each with its link.
    pub detections: Vec<AnnotatedDetection>,

    pub stats: PipelineStats,
}

impl fmt::Display for PipelineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Annotated {}x{} image ({} bytes JPEG)",
            self.image.width, self.image.height, self.image.byte_len
        )?;
        writeln!(
            f,
            "{} detection(s) kept of {} ({} duplicate(s), {} rejected box(es))",
            self.detections.len(),
            self.stats.raw,
            self.stats.duplicates,
            self.stats.rejected
        )?;

        if self.detections.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        for detection in &self.detections {
            let [x1, y1, x2, y2] = detection.bbox.to_array();
            writeln!(
                f,
                "  {} ({:.2}) at [{}, {}, {}, {}] -> {}",
                detection.class_name, detection.confidence, x1, y1, x2, y2, detection.link
            )?;
        }

        Ok(())
    }
}
