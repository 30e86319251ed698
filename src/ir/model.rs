//! Detection records at each stage of the pipeline.
//!
//! A detection starts as a [`RawDetection`] (class index, float box), is named
//! through the class catalog into a [`Detection`], has its box clipped and
//! rounded into a [`ValidatedDetection`], and finally gains a reference link
//! as an [`AnnotatedDetection`]. Each stage is a new value; nothing is
//! mutated in place.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::ids::ClassIndex;
use super::space::Pixel;

/// One row as emitted by the detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Index into the class catalog.
    pub class_index: ClassIndex,

    /// Detector confidence, expected in `[0, 1]`.
    pub confidence: f64,

    /// Box in pixel coordinates of the input image.
    #[serde(rename = "box")]
    pub bbox: BBoxXYXY<Pixel>,
}

impl RawDetection {
    /// Creates a new raw detection.
    pub fn new(class_index: impl Into<ClassIndex>, confidence: f64, bbox: BBoxXYXY<Pixel>) -> Self {
        Self {
            class_index: class_index.into(),
            confidence,
            bbox,
        }
    }
}

/// A detection whose class index has been resolved to a name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: BBoxXYXY<Pixel>,
}

impl Detection {
    /// Creates a new named detection.
    pub fn new(class_name: impl Into<String>, confidence: f64, bbox: BBoxXYXY<Pixel>) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bbox,
        }
    }
}

/// An integer box that lies inside its canvas with `x1 < x2` and `y1 < y2`.
///
/// Only the geometry step constructs these, so holding one is proof that the
/// box was validated against some image's dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBox {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl PixelBox {
    /// Returns `None` unless the corners are strictly ordered on both axes.
    pub(crate) fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Option<Self> {
        (x1 < x2 && y1 < y2).then_some(Self { x1, y1, x2, y2 })
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn x2(&self) -> u32 {
        self.x2
    }

    pub fn y2(&self) -> u32 {
        self.y2
    }

    /// Returns the corners in `[x1, y1, x2, y2]` order.
    pub fn to_array(&self) -> [u32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl Serialize for PixelBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

/// A named detection whose box survived geometry validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidatedDetection {
    pub class_name: String,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: PixelBox,
}

/// A validated detection together with its reference link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedDetection {
    pub class_name: String,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: PixelBox,

    /// Reference page for the class; never empty.
    pub link: String,
}

impl AnnotatedDetection {
    /// Attaches a link to a validated detection.
    pub fn new(detection: ValidatedDetection, link: impl Into<String>) -> Self {
        Self {
            class_name: detection.class_name,
            confidence: detection.confidence,
            bbox: detection.bbox,
            link: link.into(),
        }
    }
}
