//! Axis-aligned rectangles in XYXY form.

use serde::Serialize;

use super::coord::Coord;
use super::{Pixels, Points, POINTS_PER_INCH};

/// An axis-aligned rectangle stored as its min and max corners.
///
/// In [`Points`] space `min` is the bottom-left corner; in [`Pixels`] space
/// it is the top-left corner. Both are the corner nearest the origin.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> Rect<TSpace> {
    /// Creates a new rectangle from min and max coordinates.
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from its origin corner and its size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: Coord::new(x, y),
            max: Coord::new(x + width, y + height),
        }
    }

    /// Returns the rectangle as `(x, y, width, height)`.
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.min.x, self.min.y, self.width(), self.height())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if the rectangle lies entirely inside `outer`.
    pub fn is_within(&self, outer: &Rect<TSpace>) -> bool {
        self.min.x >= outer.min.x
            && self.min.y >= outer.min.y
            && self.max.x <= outer.max.x
            && self.max.y <= outer.max.y
    }

    /// Returns true if the two rectangles share a region of positive area.
    pub fn overlaps(&self, other: &Rect<TSpace>) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

impl<TSpace> std::fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.min.x)
            .field("y", &self.min.y)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("x", &self.min.x)?;
        state.serialize_field("y", &self.min.y)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

impl Rect<Points> {
    /// Maps a page rectangle into raster space for a page of `page_height`
    /// points rendered at `dpi`.
    ///
    /// The y axis is flipped: the top edge in PDF space becomes the min
    /// corner in pixel space.
    pub fn to_pixels(&self, page_height: f64, dpi: f64) -> Rect<Pixels> {
        let scale = dpi / POINTS_PER_INCH;
        Rect::<Pixels>::from_xyxy_px(
            self.min.x * scale,
            (page_height - self.max.y) * scale,
            self.max.x * scale,
            (page_height - self.min.y) * scale,
        )
    }
}

impl Rect<Pixels> {
    #[inline]
    fn from_xyxy_px(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Snaps the rectangle to the pixel grid.
    ///
    /// Returns `(x, y, width, height)` with the corners rounded to the
    /// nearest pixel; width and height are at least one pixel.
    pub fn snap(&self) -> (i64, i64, u32, u32) {
        let x0 = self.min.x.round() as i64;
        let y0 = self.min.y.round() as i64;
        let x1 = self.max.x.round() as i64;
        let y1 = self.max.y.round() as i64;
        (x0, y0, (x1 - x0).max(1) as u32, (y1 - y0).max(1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_xywh() {
        let rect: Rect<Points> = Rect::from_xywh(54.0, 36.0, 252.0, 144.0);
        assert_eq!(rect.min.x, 54.0);
        assert_eq!(rect.min.y, 36.0);
        assert_eq!(rect.max.x, 306.0);
        assert_eq!(rect.max.y, 180.0);
        assert_eq!(rect.to_xywh(), (54.0, 36.0, 252.0, 144.0));
    }

    #[test]
    fn test_rect_overlap_is_exclusive_at_edges() {
        let a: Rect<Points> = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let touching: Rect<Points> = Rect::from_xywh(10.0, 0.0, 10.0, 10.0);
        let inside: Rect<Points> = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_to_pixels_flips_y_axis() {
        // Bottom-left sticker slot on a letter page, rendered at 72 DPI.
        let rect: Rect<Points> = Rect::from_xywh(54.0, 36.0, 252.0, 144.0);
        let px = rect.to_pixels(792.0, 72.0);
        assert_eq!(px.snap(), (54, 612, 252, 144));
    }

    #[test]
    fn test_to_pixels_scales_with_dpi() {
        let rect: Rect<Points> = Rect::from_xywh(72.0, 0.0, 72.0, 72.0);
        let px = rect.to_pixels(144.0, 144.0);
        assert_eq!(px.snap(), (144, 144, 144, 144));
    }
}
