//! Recorded detections in JSON.
//!
//! Two shapes are accepted:
//!
//! ```json
//! [{"class_index": 0, "confidence": 0.91, "box": [10, 10, 50, 50]}]
//! ```
//!
//! or, when the boxes are fractions of the image size,
//!
//! ```json
//! {"normalized": true, "detections": [{"class_index": 0, "confidence": 0.91, "box": [0.1, 0.1, 0.5, 0.5]}]}
//! ```
//!
//! Row order is preserved; the deduplication step depends on it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::recording::{RecordedRow, RecordedSpace, Recording};
use super::ClassIndex;
use crate::error::CropmarkError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonRecording {
    Rows(Vec<JsonRow>),
    Wrapped {
        #[serde(default)]
        normalized: bool,
        detections: Vec<JsonRow>,
    },
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    class_index: u64,
    confidence: f64,
    #[serde(rename = "box")]
    bbox: [f64; 4],
}

impl From<JsonRecording> for Recording {
    fn from(json: JsonRecording) -> Self {
        let (space, rows) = match json {
            JsonRecording::Rows(rows) => (RecordedSpace::Pixel, rows),
            JsonRecording::Wrapped {
                normalized,
                detections,
            } => {
                let space = if normalized {
                    RecordedSpace::Normalized
                } else {
                    RecordedSpace::Pixel
                };
                (space, detections)
            }
        };

        Recording {
            space,
            rows: rows
                .into_iter()
                .map(|row| RecordedRow {
                    class_index: ClassIndex::new(row.class_index),
                    confidence: row.confidence,
                    bbox: row.bbox,
                })
                .collect(),
        }
    }
}

/// Reads recorded detections from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not match either shape.
pub fn read_detections_json(path: &Path) -> Result<Recording, CropmarkError> {
    let file = File::open(path).map_err(CropmarkError::Io)?;
    let reader = BufReader::new(file);

    let json: JsonRecording =
        serde_json::from_reader(reader).map_err(|source| CropmarkError::DetectionsJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(json.into())
}

/// Reads recorded detections from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Recording, serde_json::Error> {
    serde_json::from_str::<JsonRecording>(json).map(Recording::from)
}
