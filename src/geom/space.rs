//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between the two coordinate systems stickerpress works in at compile time.

use std::fmt;

/// Marker type for PDF user space.
///
/// One unit is one typographic point (1/72 inch) and the origin is the
/// bottom-left corner of the page, with y growing upwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Points {}

/// Marker type for raster pixel coordinates.
///
/// The origin is the top-left corner of the image, with y growing downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixels {}

impl fmt::Debug for Points {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Pixels {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Converts a length in inches to PDF points.
#[inline]
pub fn inches_to_points(inches: f64) -> f64 {
    inches * POINTS_PER_INCH
}

/// Converts a length in inches to whole pixels at `dpi`, truncating.
#[inline]
pub fn inches_to_pixels(inches: f64, dpi: u32) -> u32 {
    (inches * dpi as f64) as u32
}
