//! Detector output captured ahead of time.
//!
//! A [`Recording`] is what the recorded-detection readers produce. Its boxes
//! may be in pixel or normalized space; normalized boxes can only be turned
//! into pixel boxes once the image size is known, so that conversion happens
//! in [`Recording::to_raw_detections`].

use super::bbox::BBoxXYXY;
use super::ids::ClassIndex;
use super::model::RawDetection;
use super::space::{Normalized, Pixel};

/// Coordinate space of every box in a recording.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordedSpace {
    #[default]
    Pixel,
    Normalized,
}

/// One recorded row; the box is interpreted according to the recording's space.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRow {
    pub class_index: ClassIndex,
    pub confidence: f64,
    pub bbox: [f64; 4],
}

/// An ordered set of detections for a single image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recording {
    pub space: RecordedSpace,
    pub rows: Vec<RecordedRow>,
}

impl Recording {
    /// Creates a recording in pixel space.
    pub fn pixel(rows: Vec<RecordedRow>) -> Self {
        Self {
            space: RecordedSpace::Pixel,
            rows,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Converts every row to a pixel-space [`RawDetection`] for an image of
    /// the given size, preserving row order.
    pub fn to_raw_detections(&self, image_width: u32, image_height: u32) -> Vec<RawDetection> {
        self.rows
            .iter()
            .map(|row| {
                let [x1, y1, x2, y2] = row.bbox;
                let bbox = match self.space {
                    RecordedSpace::Pixel => BBoxXYXY::<Pixel>::from_xyxy(x1, y1, x2, y2),
                    RecordedSpace::Normalized => BBoxXYXY::<Normalized>::from_xyxy(x1, y1, x2, y2)
                        .to_pixel(image_width, image_height),
                };
                RawDetection::new(row.class_index, row.confidence, bbox)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(class_index: u64, bbox: [f64; 4]) -> RecordedRow {
        RecordedRow {
            class_index: ClassIndex::new(class_index),
            confidence: 0.9,
            bbox,
        }
    }

    #[test]
    fn pixel_rows_pass_through() {
        let recording = Recording::pixel(vec![row(1, [10.0, 20.0, 30.0, 40.0])]);
        let raw = recording.to_raw_detections(640, 480);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].bbox.to_array(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(raw[0].class_index, ClassIndex::new(1));
    }

    #[test]
    fn normalized_rows_scale_to_image() {
        let recording = Recording {
            space: RecordedSpace::Normalized,
            rows: vec![row(0, [0.1, 0.5, 0.5, 1.0]), row(2, [0.0, 0.0, 1.0, 1.0])],
        };
        let raw = recording.to_raw_detections(200, 100);
        assert_eq!(raw[0].bbox.to_array(), [20.0, 50.0, 100.0, 100.0]);
        assert_eq!(raw[1].bbox.to_array(), [0.0, 0.0, 200.0, 100.0]);
        assert_eq!(raw[1].class_index, ClassIndex::new(2));
    }
}
