//! Sheet compositor.
//!
//! Lays the rendered stickers out ten to a US Letter page (two columns of
//! five), writes the multi-page PDF and rasterizes page 1 as a PNG preview.
//! The PDF and the preview are both produced from the same [`SheetPlan`].

mod collect;
mod layout;
mod pdf;
mod preview;
mod report;

pub use collect::{aspect_warnings, collect_images, AspectWarning, CollectedImages};
pub use layout::{grid_position, paginate, slot_rect, PagePlan, Placement, SheetPlan};
pub use pdf::{render_pdf, write_pdf};
pub use preview::{page_size_px, render_preview, write_preview};
pub use report::SheetReport;

use crate::config::{OutputPaths, SheetConfig};
use crate::error::StickerPressError;

/// Composes every sticker in `paths.sticker_dir` into `paths.pdf` and
/// `paths.preview`.
pub fn compose_sheet(
    paths: &OutputPaths,
    config: &SheetConfig,
) -> Result<SheetReport, StickerPressError> {
    let collected = collect_images(&paths.sticker_dir, config)?;
    if collected.selected.is_empty() {
        tracing::warn!(
            "No sticker images found in {}; writing a blank page",
            paths.sticker_dir.display()
        );
    }

    let warnings = aspect_warnings(&collected.selected, config);
    let plan = paginate(&collected.selected, config);

    write_pdf(&plan, &paths.pdf)?;
    let preview_size = write_preview(&plan, config.preview_dpi, &paths.preview)?;

    Ok(SheetReport {
        sticker_dir: paths.sticker_dir.clone(),
        pdf: paths.pdf.clone(),
        preview: paths.preview.clone(),
        images_found: collected.found(),
        images_placed: plan.placement_count(),
        images_ignored: collected.ignored,
        pages: plan.page_count(),
        border: plan.draw_border,
        preview_size,
        warnings,
    })
}
