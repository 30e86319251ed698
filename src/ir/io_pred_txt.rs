//! Recorded detections in YOLOv5 prediction-row text.
//!
//! One detection per line, whitespace separated, in the column order of a
//! YOLOv5 `pred` tensor row:
//!
//! ```text
//! # x1 y1 x2 y2 confidence class_index
//! 10 10 50 50 0.91 0
//! 12.5 8.0 220.25 190.0 0.44 3
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Boxes are pixel
//! coordinates.

use std::fs;
use std::path::Path;

use super::recording::{RecordedRow, Recording};
use super::ClassIndex;
use crate::error::CropmarkError;

const COLUMNS: usize = 6;

/// Reads recorded detections from a prediction text file.
pub fn read_pred_txt(path: &Path) -> Result<Recording, CropmarkError> {
    let content = fs::read_to_string(path).map_err(CropmarkError::Io)?;
    parse_pred_txt(&content, path)
}

/// Parses prediction text; `path` is only used in error messages.
pub fn parse_pred_txt(content: &str, path: &Path) -> Result<Recording, CropmarkError> {
    let mut rows = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        if let Some(row) = parse_pred_line(line, path, line_idx + 1)? {
            rows.push(row);
        }
    }
    Ok(Recording::pixel(rows))
}

fn parse_pred_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<Option<RecordedRow>, CropmarkError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    // Take one token past the expected count so oversized rows are detected
    // without collecting an unbounded line.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(COLUMNS + 1).collect();
    if tokens.len() != COLUMNS {
        return Err(CropmarkError::PredictionParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: if tokens.len() < COLUMNS {
                format!("expected {COLUMNS} tokens, found {}", tokens.len())
            } else {
                format!("expected {COLUMNS} tokens, found more")
            },
        });
    }

    let x1 = parse_f64_token(tokens[0], "x1", file_path, line_num)?;
    let y1 = parse_f64_token(tokens[1], "y1", file_path, line_num)?;
    let x2 = parse_f64_token(tokens[2], "x2", file_path, line_num)?;
    let y2 = parse_f64_token(tokens[3], "y2", file_path, line_num)?;
    let confidence = parse_f64_token(tokens[4], "confidence", file_path, line_num)?;
    let class_index = parse_class_token(tokens[5], file_path, line_num)?;

    Ok(Some(RecordedRow {
        class_index: ClassIndex::new(class_index),
        confidence,
        bbox: [x1, y1, x2, y2],
    }))
}

/// Fuzz-only entrypoint for single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_pred_line(input: &str) -> Result<(), CropmarkError> {
    let _ = parse_pred_line(input, Path::new("<fuzz>"), 1)?;
    Ok(())
}

fn parse_f64_token(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, CropmarkError> {
    raw.parse::<f64>()
        .map_err(|_| CropmarkError::PredictionParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
        })
}

/// Class indices come out of the model as floats (`3.0`), so integral floats
/// are accepted alongside plain integers.
fn parse_class_token(raw: &str, file_path: &Path, line_num: usize) -> Result<u64, CropmarkError> {
    if let Ok(index) = raw.parse::<u64>() {
        return Ok(index);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => {
            Ok(value as u64)
        }
        _ => Err(CropmarkError::PredictionParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid class_index '{raw}'; expected non-negative integer"),
        }),
    }
}
