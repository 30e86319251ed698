//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters so that pixel boxes and
//! normalized boxes cannot be mixed up at compile time.

use std::fmt;

/// Marker type for absolute pixel coordinates, origin at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for coordinates expressed as fractions of the image size.
///
/// Some detectors report boxes this way; they are scaled to [`Pixel`]
/// before any geometry validation happens.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
