//! Intermediate representation for detections.
//!
//! Detector output passes through several shapes before it is returned to a
//! caller; this module defines all of them, along with readers for detector
//! output that was recorded to disk.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: newtypes and marker types keep class indices, pixel
//!    boxes, and normalized boxes from being mixed up.
//!
//! 2. **Permissive Construction**: raw boxes may be unordered or non-finite,
//!    so the pipeline can decide what to drop instead of a parser panicking.
//!
//! 3. **Validated Output**: [`PixelBox`] can only be built by the geometry
//!    step, so every box that reaches annotation is known to be in bounds.
//!
//! # Example
//!
//! ```
//! use cropmark::ir::{BBoxXYXY, Pixel, RawDetection};
//!
//! let raw = RawDetection::new(0u64, 0.91, BBoxXYXY::<Pixel>::from_xyxy(10.0, 10.0, 50.0, 50.0));
//! assert!(raw.bbox.is_ordered());
//! ```

mod bbox;
mod ids;
pub mod io_json;
pub mod io_pred_txt;
mod model;
mod recording;
mod space;

pub use bbox::BBoxXYXY;
pub use ids::ClassIndex;
pub use model::{AnnotatedDetection, Detection, PixelBox, RawDetection, ValidatedDetection};
pub use recording::{RecordedRow, RecordedSpace, Recording};
pub use space::{Normalized, Pixel};
