//! Raster preview of the first page of a [`SheetPlan`].

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage, RgbImage};

use super::layout::{PagePlan, SheetPlan};
use crate::error::StickerPressError;
use crate::geom::POINTS_PER_INCH;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Pixel size of one page rendered at `dpi`.
pub fn page_size_px(plan: &SheetPlan, dpi: f64) -> (u32, u32) {
    let scale = dpi / POINTS_PER_INCH;
    (
        (plan.page_width_pt * scale).round().max(1.0) as u32,
        (plan.page_height_pt * scale).round().max(1.0) as u32,
    )
}

/// Rasterizes page 1 of `plan` at `dpi`.
///
/// Stickers are resampled into their slot rectangles on a white page;
/// outlines are one pixel wide when the plan asks for borders.
pub fn render_preview(plan: &SheetPlan, dpi: f64) -> Result<RgbImage, StickerPressError> {
    let (width, height) = page_size_px(plan, dpi);
    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);

    if let Some(page) = plan.pages.first() {
        paint_page(&mut canvas, page, plan, dpi)?;
    }

    Ok(image::DynamicImage::ImageRgba8(canvas).to_rgb8())
}

fn paint_page(
    canvas: &mut RgbaImage,
    page: &PagePlan,
    plan: &SheetPlan,
    dpi: f64,
) -> Result<(), StickerPressError> {
    for placement in &page.placements {
        let (x, y, w, h) = placement.rect.to_pixels(plan.page_height_pt, dpi).snap();

        let source = image::open(&placement.image).map_err(|source| {
            StickerPressError::ImageDecode {
                path: placement.image.clone(),
                source,
            }
        })?;
        let scaled = imageops::resize(&source.to_rgba8(), w, h, FilterType::Triangle);
        imageops::overlay(canvas, &scaled, x, y);

        if plan.draw_border {
            outline(canvas, x, y, w, h);
        }
    }
    Ok(())
}

fn outline(canvas: &mut RgbaImage, x: i64, y: i64, w: u32, h: u32) {
    let right = x + w as i64 - 1;
    let bottom = y + h as i64 - 1;
    let mut put = |px: i64, py: i64| {
        if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
            canvas.put_pixel(px as u32, py as u32, BLACK);
        }
    };

    for px in x..=right {
        put(px, y);
        put(px, bottom);
    }
    for py in y..=bottom {
        put(x, py);
        put(right, py);
    }
}

/// Renders page 1 and saves it as PNG at `path`.
pub fn write_preview(plan: &SheetPlan, dpi: f64, path: &Path) -> Result<(u32, u32), StickerPressError> {
    let preview = render_preview(plan, dpi)?;
    preview
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| StickerPressError::PreviewWrite {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(
        "Wrote preview {} ({}x{})",
        path.display(),
        preview.width(),
        preview.height()
    );
    Ok(preview.dimensions())
}
