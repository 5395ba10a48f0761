//! PDF output for a [`SheetPlan`].
//!
//! Every placed image becomes a Flate-compressed `DeviceRGB` image XObject,
//! with a `DeviceGray` soft mask when the source carries transparency. Each
//! page draws its images through a `cm` transform that scales the unit
//! square onto the slot rectangle.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref};

use super::layout::SheetPlan;
use crate::error::StickerPressError;
use crate::geom::{Points, Rect};

/// Width of the optional sticker outline, in points.
const BORDER_WIDTH: f32 = 1.0;

/// Decoded pixel data ready to embed.
struct EmbeddedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    fn load(path: &Path) -> Result<Self, StickerPressError> {
        let decoded = image::open(path).map_err(|source| StickerPressError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        let mut translucent = false;

        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            translucent |= a != u8::MAX;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        Ok(Self {
            width,
            height,
            rgb,
            alpha: translucent.then_some(alpha),
        })
    }
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Hands out consecutive object ids.
struct RefAllocator(Ref);

impl RefAllocator {
    fn new() -> Self {
        Self(Ref::new(1))
    }

    fn next(&mut self) -> Ref {
        self.0.bump()
    }
}

/// Serializes `plan` into PDF bytes.
///
/// Images are decoded from disk as they are reached; a file that cannot be
/// decoded aborts the document.
pub fn render_pdf(plan: &SheetPlan) -> Result<Vec<u8>, StickerPressError> {
    let mut refs = RefAllocator::new();
    let catalog_id = refs.next();
    let tree_id = refs.next();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);

    let media_box = PdfRect::new(
        0.0,
        0.0,
        plan.page_width_pt as f32,
        plan.page_height_pt as f32,
    );
    let mut page_ids = Vec::with_capacity(plan.pages.len());

    for page_plan in &plan.pages {
        let page_id = refs.next();
        let content_id = refs.next();
        page_ids.push(page_id);

        let mut content = Content::new();
        let mut x_objects: Vec<(String, Ref)> = Vec::with_capacity(page_plan.placements.len());

        for placement in &page_plan.placements {
            let image = EmbeddedImage::load(&placement.image)?;
            let image_id = refs.next();
            let mask_id = image.alpha.as_ref().map(|_| refs.next());
            embed_image(&mut pdf, image_id, mask_id, &image)?;

            let name = format!("Im{}", x_objects.len() + 1);
            draw_image(&mut content, &name, &placement.rect);
            x_objects.push((name, image_id));
        }

        if plan.draw_border && !page_plan.is_blank() {
            content.save_state();
            content.set_stroke_rgb(0.0, 0.0, 0.0);
            content.set_line_width(BORDER_WIDTH);
            for placement in &page_plan.placements {
                let (x, y, w, h) = placement.rect.to_xywh();
                content.rect(x as f32, y as f32, w as f32, h as f32);
            }
            content.stroke();
            content.restore_state();
        }

        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(media_box);
        page.parent(tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut dict = resources.x_objects();
            for (name, id) in &x_objects {
                dict.pair(Name(name.as_bytes()), *id);
            }
            dict.finish();
        }
        page.finish();

        tracing::debug!(
            "page {} holds {} stickers",
            page_ids.len(),
            page_plan.placements.len()
        );
    }

    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    Ok(pdf.finish())
}

fn embed_image(
    pdf: &mut Pdf,
    image_id: Ref,
    mask_id: Option<Ref>,
    image: &EmbeddedImage,
) -> std::io::Result<()> {
    let rgb = deflate(&image.rgb)?;
    let mut xobject = pdf.image_xobject(image_id, &rgb);
    xobject.filter(Filter::FlateDecode);
    xobject.width(image.width as i32);
    xobject.height(image.height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobject.s_mask(mask_id);
    }
    xobject.finish();

    if let (Some(mask_id), Some(alpha)) = (mask_id, &image.alpha) {
        let alpha = deflate(alpha)?;
        let mut mask = pdf.image_xobject(mask_id, &alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(image.width as i32);
        mask.height(image.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }

    Ok(())
}

/// Paints the XObject `name` stretched over `rect`.
fn draw_image(content: &mut Content, name: &str, rect: &Rect<Points>) {
    let (x, y, w, h) = rect.to_xywh();
    content.save_state();
    content.transform([w as f32, 0.0, 0.0, h as f32, x as f32, y as f32]);
    content.x_object(Name(name.as_bytes()));
    content.restore_state();
}

/// Renders `plan` and writes it to `path`.
pub fn write_pdf(plan: &SheetPlan, path: &Path) -> Result<(), StickerPressError> {
    let bytes = render_pdf(plan)?;
    fs::write(path, bytes).map_err(|source| StickerPressError::PdfWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Wrote {} with {} pages",
        path.display(),
        plan.page_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::sheet::layout::paginate;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::PathBuf;

    fn count(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle.as_bytes())
            .count()
    }

    fn write_stickers(dir: &Path, n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| {
                let path = dir.join(format!("{i:02}.png"));
                RgbImage::from_pixel(7, 4, Rgb([200, 10, 10]))
                    .save(&path)
                    .expect("write png");
                path
            })
            .collect()
    }

    #[test]
    fn blank_plan_produces_single_page_document() {
        let plan = paginate(&[], &SheetConfig::default());
        let bytes = render_pdf(&plan).expect("render");

        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, "/Type /Page") - count(&bytes, "/Type /Pages"), 1);
        assert_eq!(count(&bytes, "/Subtype /Image"), 0);
    }

    #[test]
    fn one_image_xobject_per_placement() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let images = write_stickers(dir.path(), 12);
        let plan = paginate(&images, &SheetConfig::default());
        let bytes = render_pdf(&plan).expect("render");

        assert_eq!(count(&bytes, "/Type /Page") - count(&bytes, "/Type /Pages"), 2);
        assert_eq!(count(&bytes, "/Subtype /Image"), 12);
        assert_eq!(count(&bytes, "/SMask"), 0);
        assert_eq!(count(&bytes, "/FlateDecode"), 12);
    }

    #[test]
    fn transparent_images_get_a_soft_mask() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(7, 4, Rgba([0, 0, 0, 128]))
            .save(&path)
            .expect("write png");

        let plan = paginate(&[path], &SheetConfig::default());
        let bytes = render_pdf(&plan).expect("render");
        assert_eq!(count(&bytes, "/SMask"), 1);
        assert_eq!(count(&bytes, "/Subtype /Image"), 2);
    }

    #[test]
    fn blank_page_with_borders_strokes_nothing() {
        let config = SheetConfig {
            draw_border: true,
            ..SheetConfig::default()
        };
        let bytes = render_pdf(&paginate(&[], &config)).expect("render");
        assert_eq!(count(&bytes, " RG"), 0);
        assert_eq!(count(&bytes, " w\n"), 0);
        assert_eq!(count(&bytes, " re\n"), 0);
    }

    #[test]
    fn borders_outline_each_placement() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let images = write_stickers(dir.path(), 3);
        let config = SheetConfig {
            draw_border: true,
            ..SheetConfig::default()
        };
        let bytes = render_pdf(&paginate(&images, &config)).expect("render");
        assert_eq!(count(&bytes, " RG"), 1);
        assert_eq!(count(&bytes, " re\n"), 3);
    }

    #[test]
    fn undecodable_image_aborts() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not a png").expect("write");

        let plan = paginate(&[path.clone()], &SheetConfig::default());
        match render_pdf(&plan) {
            Err(StickerPressError::ImageDecode { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected ImageDecode, got {other:?}"),
        }
    }
}
