//! Sticker composition: primary name, QR code and secondary name stacked
//! and centered on a white canvas.

use image::{imageops, DynamicImage, GrayImage, Rgb, RgbImage};

use super::font::{FontSet, TextBox};
use crate::config::StickerConfig;
use crate::geom::{Coord, Pixels};

/// Where each element of a sticker goes, as the top-left corner of the
/// element in canvas pixels. Offsets may be negative when the content is
/// larger than the canvas; drawing clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickerLayout {
    pub primary: Coord<Pixels>,
    pub qr: Coord<Pixels>,
    pub secondary: Coord<Pixels>,
    /// Height of the whole stack including spacing.
    pub content_height: i64,
}

/// Computes the vertical stack for a sticker.
///
/// `total = primary + qr + secondary + 2 * spacing` and the stack starts at
/// `(canvas_height - total) / 2`. Each element is centered horizontally on
/// its own: `(canvas_width - element_width) / 2`. Integer division floors,
/// so odd remainders put the extra pixel below and to the right.
pub fn plan_sticker(
    canvas_width: u32,
    canvas_height: u32,
    primary: &TextBox,
    qr_size: u32,
    secondary: &TextBox,
    spacing: u32,
) -> StickerLayout {
    let canvas_w = canvas_width as i64;
    let spacing = spacing as i64;
    let qr = qr_size as i64;
    let primary_h = primary.height() as i64;
    let secondary_h = secondary.height() as i64;

    let content_height = primary_h + qr + secondary_h + spacing * 2;
    let start_y = (canvas_height as i64 - content_height).div_euclid(2);
    let centered = |width: i64| (canvas_w - width).div_euclid(2) as f64;

    StickerLayout {
        primary: Coord::new(centered(primary.width() as i64), start_y as f64),
        qr: Coord::new(centered(qr), (start_y + primary_h + spacing) as f64),
        secondary: Coord::new(
            centered(secondary.width() as i64),
            (start_y + primary_h + spacing + qr + spacing) as f64,
        ),
        content_height,
    }
}

/// Names as printed on a sticker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayNames {
    /// Large text above the QR code.
    pub primary: String,
    /// Small text below the QR code.
    pub secondary: String,
}

/// Composes a sticker canvas from the display names and a rendered QR code.
pub fn compose_sticker(
    names: &DisplayNames,
    qr: &GrayImage,
    fonts: &FontSet,
    config: &StickerConfig,
) -> RgbImage {
    let width = config.width_px();
    let height = config.height_px();
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    let primary_ink = fonts.large.measure(&names.primary);
    let secondary_ink = fonts.small.measure(&names.secondary);
    let layout = plan_sticker(
        width,
        height,
        &primary_ink,
        qr.width(),
        &secondary_ink,
        config.spacing_px,
    );
    tracing::debug!(?layout, "sticker layout for {}", names.primary);

    fonts.large.draw(
        &mut canvas,
        layout.primary.x as i64,
        layout.primary.y as i64,
        &names.primary,
        &primary_ink,
    );
    fonts.small.draw(
        &mut canvas,
        layout.secondary.x as i64,
        layout.secondary.y as i64,
        &names.secondary,
        &secondary_ink,
    );

    let qr_rgb = DynamicImage::ImageLuma8(qr.clone()).to_rgb8();
    imageops::replace(&mut canvas, &qr_rgb, layout.qr.x as i64, layout.qr.y as i64);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::font::Typeface;

    fn text_box(width: i32, height: i32) -> TextBox {
        TextBox {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    #[test]
    fn plan_centers_stack_vertically() {
        // 60 + 300 + 30 + 2 * 20 = 430; (600 - 430) / 2 = 85
        let layout = plan_sticker(1050, 600, &text_box(400, 60), 300, &text_box(200, 30), 20);

        assert_eq!(layout.content_height, 430);
        assert_eq!(layout.primary, Coord::new(325.0, 85.0));
        assert_eq!(layout.qr, Coord::new(375.0, 165.0));
        assert_eq!(layout.secondary, Coord::new(425.0, 485.0));
    }

    #[test]
    fn plan_centers_each_element_independently() {
        let layout = plan_sticker(1000, 600, &text_box(101, 10), 300, &text_box(0, 0), 20);
        // (1000 - 101) / 2 floors to 449
        assert_eq!(layout.primary.x, 449.0);
        assert_eq!(layout.qr.x, 350.0);
        assert_eq!(layout.secondary.x, 500.0);
    }

    #[test]
    fn plan_allows_overflowing_content() {
        let layout = plan_sticker(100, 100, &text_box(300, 90), 80, &text_box(10, 10), 5);
        assert_eq!(layout.content_height, 190);
        assert_eq!(layout.primary.y, -45.0);
        assert_eq!(layout.primary.x, -100.0);
    }

    #[test]
    fn compose_places_qr_and_text_on_white_canvas() {
        let config = StickerConfig::default();
        let fonts = FontSet::builtin();
        let qr = GrayImage::from_pixel(300, 300, image::Luma([0u8]));
        let names = DisplayNames {
            primary: "ADA".into(),
            secondary: "LOVELACE".into(),
        };

        let sticker = compose_sticker(&names, &qr, &fonts, &config);
        assert_eq!(sticker.dimensions(), (1050, 600));

        let primary = Typeface::Bitmap { scale: 10 }.measure("ADA");
        let secondary = Typeface::Bitmap { scale: 5 }.measure("LOVELACE");
        let layout = plan_sticker(1050, 600, &primary, 300, &secondary, 20);

        // QR block is pasted at its planned position.
        let (qx, qy) = (layout.qr.x as u32, layout.qr.y as u32);
        assert_eq!(sticker.get_pixel(qx, qy), &Rgb([0, 0, 0]));
        assert_eq!(sticker.get_pixel(qx + 299, qy + 299), &Rgb([0, 0, 0]));
        assert_eq!(sticker.get_pixel(qx - 1, qy), &Rgb([255, 255, 255]));

        // Corners of the canvas stay white.
        assert_eq!(sticker.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(sticker.get_pixel(1049, 599), &Rgb([255, 255, 255]));

        // Some ink lands in the primary and secondary text rows.
        let row_has_ink = |y: u32| (0..1050).any(|x| sticker.get_pixel(x, y).0[0] < 128);
        assert!(row_has_ink(layout.primary.y as u32));
        assert!(row_has_ink(layout.secondary.y as u32));
    }
}
