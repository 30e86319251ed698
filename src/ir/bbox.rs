//! Raw bounding boxes in XYXY order, as a detector reports them.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::{Normalized, Pixel};

/// An axis-aligned box `(x1, y1, x2, y2)` with `f64` corners.
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`].
///
/// Construction does NOT check that `x1 < x2` or that the values are
/// finite. Detectors do emit such boxes, and deciding what to do with them
/// belongs to the pipeline's geometry step, not to this type.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a box from its two corners.
    #[inline]
    pub fn from_xyxy(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            _space: PhantomData,
        }
    }

    /// Returns the corners as an array, in `[x1, y1, x2, y2]` order.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Returns true if no coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Returns true if `x1 < x2` and `y1 < y2`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("x1", &self.x1)
            .field("y1", &self.y1)
            .field("x2", &self.x2)
            .field("y2", &self.y2)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Serialized as a bare `[x1, y1, x2, y2]` array; written by hand to avoid
// TSpace: Serialize/Deserialize bounds.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x1, y1, x2, y2] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(Self::from_xyxy(x1, y1, x2, y2))
    }
}

impl BBoxXYXY<Normalized> {
    /// Scales a normalized box to pixel coordinates of an image.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> BBoxXYXY<Pixel> {
        let (w, h) = (f64::from(image_width), f64::from(image_height));
        BBoxXYXY::from_xyxy(self.x1 * w, self.y1 * h, self.x2 * w, self.y2 * h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_ordering() {
        let ordered: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert!(ordered.is_ordered());

        let swapped: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(100.0, 100.0, 5.0, 5.0);
        assert!(!swapped.is_ordered());

        let flat: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 10.0, 10.0, 50.0);
        assert!(!flat.is_ordered());
    }

    #[test]
    fn test_bbox_is_finite() {
        let nan: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(f64::NAN, 0.0, 1.0, 1.0);
        assert!(!nan.is_finite());

        let inf: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(0.0, 0.0, f64::INFINITY, 1.0);
        assert!(!inf.is_finite());
    }

    #[test]
    fn test_normalized_to_pixel() {
        let norm: BBoxXYXY<Normalized> = BBoxXYXY::from_xyxy(0.25, 0.5, 0.75, 1.0);
        let px = norm.to_pixel(200, 100);
        assert_eq!(px.to_array(), [50.0, 50.0, 150.0, 100.0]);
    }

    #[test]
    fn test_bbox_serializes_as_array() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(1.0, 2.0, 3.5, 4.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1.0,2.0,3.5,4.0]");

        let back: BBoxXYXY<Pixel> = serde_json::from_str("[1, 2, 3.5, 4]").unwrap();
        assert_eq!(back, bbox);
    }
}
