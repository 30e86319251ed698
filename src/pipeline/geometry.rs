//! Box clipping and rejection.
//!
//! Each corner is clamped into the canvas (`[0, width-1]`, `[0, height-1]`),
//! rounded to the nearest pixel, and the box is rejected unless it is still
//! strictly ordered. Unordered boxes are dropped, never repaired by swapping
//! corners.

use std::fmt;

use crate::ir::{BBoxXYXY, Pixel, PixelBox};

/// Why a box did not survive validation. Not an error: the detection is
/// simply left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryRejection {
    /// The image has zero width or height, so no box can fit.
    EmptyCanvas,

    /// A coordinate was NaN or infinite.
    NonFinite,

    /// After clipping and rounding, `x1 >= x2` or `y1 >= y2`. Covers
    /// unordered input, zero-area boxes, and boxes entirely off the canvas.
    Degenerate { clipped: [u32; 4] },
}

impl fmt::Display for GeometryRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryRejection::EmptyCanvas => write!(f, "image has no pixels"),
            GeometryRejection::NonFinite => write!(f, "non-finite coordinate"),
            GeometryRejection::Degenerate { clipped } => write!(
                f,
                "degenerate after clipping to [{}, {}, {}, {}]",
                clipped[0], clipped[1], clipped[2], clipped[3]
            ),
        }
    }
}

/// Clips `bbox` to a `width x height` canvas.
pub fn validate_box(
    bbox: &BBoxXYXY<Pixel>,
    width: u32,
    height: u32,
) -> Result<PixelBox, GeometryRejection> {
    if width == 0 || height == 0 {
        return Err(GeometryRejection::EmptyCanvas);
    }
    if !bbox.is_finite() {
        return Err(GeometryRejection::NonFinite);
    }

    let x1 = clip(bbox.x1, width);
    let y1 = clip(bbox.y1, height);
    let x2 = clip(bbox.x2, width);
    let y2 = clip(bbox.y2, height);

    PixelBox::new(x1, y1, x2, y2).ok_or(GeometryRejection::Degenerate {
        clipped: [x1, y1, x2, y2],
    })
}

fn clip(value: f64, extent: u32) -> u32 {
    let max = f64::from(extent - 1);
    value.clamp(0.0, max).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(x1, y1, x2, y2)
    }

    #[test]
    fn in_bounds_box_is_unchanged() {
        let out = validate_box(&bbox(10.0, 10.0, 50.0, 50.0), 200, 200).unwrap();
        assert_eq!(out.to_array(), [10, 10, 50, 50]);
    }

    #[test]
    fn rounds_to_nearest_pixel() {
        let out = validate_box(&bbox(10.4, 10.6, 49.5, 50.49), 200, 200).unwrap();
        assert_eq!(out.to_array(), [10, 11, 50, 50]);
    }

    #[test]
    fn clips_overhanging_box() {
        let out = validate_box(&bbox(-20.0, -5.0, 250.0, 199.7), 200, 200).unwrap();
        assert_eq!(out.to_array(), [0, 0, 199, 199]);
    }

    #[test]
    fn rejects_unordered_box() {
        let err = validate_box(&bbox(100.0, 100.0, 5.0, 5.0), 200, 200).unwrap_err();
        assert_eq!(
            err,
            GeometryRejection::Degenerate {
                clipped: [100, 100, 5, 5]
            }
        );
    }

    #[test]
    fn rejects_zero_area_box() {
        assert!(validate_box(&bbox(10.0, 10.0, 10.0, 40.0), 200, 200).is_err());
        assert!(validate_box(&bbox(10.0, 10.2, 40.0, 10.4), 200, 200).is_err());
    }

    #[test]
    fn rejects_box_outside_canvas() {
        // Both x corners clamp to 199.
        assert!(validate_box(&bbox(300.0, 10.0, 400.0, 40.0), 200, 200).is_err());
        // Both y corners clamp to 0.
        assert!(validate_box(&bbox(10.0, -50.0, 40.0, -10.0), 200, 200).is_err());
    }

    #[test]
    fn rejects_non_finite_and_empty_canvas() {
        assert_eq!(
            validate_box(&bbox(f64::NAN, 0.0, 5.0, 5.0), 10, 10),
            Err(GeometryRejection::NonFinite)
        );
        assert_eq!(
            validate_box(&bbox(0.0, 0.0, 5.0, 5.0), 0, 10),
            Err(GeometryRejection::EmptyCanvas)
        );
    }

    #[test]
    fn one_pixel_canvas_rejects_everything() {
        assert!(validate_box(&bbox(0.0, 0.0, 1.0, 1.0), 1, 1).is_err());
    }
}
