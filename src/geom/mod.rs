//! Geometry primitives shared by the renderer and the sheet compositor.
//!
//! Two coordinate systems meet in this crate: PDF user space, measured in
//! points with the origin at the bottom-left of the page, and raster space,
//! measured in pixels with the origin at the top-left of the image. The
//! marker types in this module keep them apart at compile time.

mod coord;
mod rect;
mod space;

pub use coord::Coord;
pub use rect::Rect;
pub use space::{inches_to_pixels, inches_to_points, Pixels, Points, POINTS_PER_INCH};
