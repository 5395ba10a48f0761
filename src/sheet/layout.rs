//! Grid layout and pagination for the printed sheet.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::SheetConfig;
use crate::geom::{Coord, Points, Rect};

/// Bottom-left corner of the sticker in `slot`, in PDF points.
///
/// Slots fill a column bottom to top before moving right: with the default
/// 2 x 5 grid, slots 0-4 are the left column and 5-9 the right one. Returns
/// `None` for slots outside the grid.
pub fn grid_position(slot: usize, config: &SheetConfig) -> Option<Coord<Points>> {
    if config.rows == 0 || slot >= config.slots_per_page() {
        return None;
    }

    let column = slot / config.rows;
    let row = slot % config.rows;
    let origin = config.grid_origin();

    Some(Coord::new(
        origin.x + column as f64 * config.sticker_width_pt(),
        origin.y + row as f64 * config.sticker_height_pt(),
    ))
}

/// The rectangle a sticker occupies in `slot`.
pub fn slot_rect(slot: usize, config: &SheetConfig) -> Option<Rect<Points>> {
    let corner = grid_position(slot, config)?;
    Some(Rect::from_xywh(
        corner.x,
        corner.y,
        config.sticker_width_pt(),
        config.sticker_height_pt(),
    ))
}

/// One image placed on a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub image: PathBuf,
    pub slot: usize,
    pub rect: Rect<Points>,
}

/// The contents of one page.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PagePlan {
    pub placements: Vec<Placement>,
}

impl PagePlan {
    pub fn is_blank(&self) -> bool {
        self.placements.is_empty()
    }
}

/// The full document: what goes where on every page.
///
/// This is the single source for both the PDF writer and the preview
/// rasterizer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetPlan {
    pub page_width_pt: f64,
    pub page_height_pt: f64,
    pub draw_border: bool,
    pub pages: Vec<PagePlan>,
}

impl SheetPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn placement_count(&self) -> usize {
        self.pages.iter().map(|page| page.placements.len()).sum()
    }
}

/// Distributes `images` over pages in order, one slot each.
///
/// Every `slots_per_page` images start a new page and the last page may be
/// partially filled. An empty input still yields a single blank page.
pub fn paginate(images: &[PathBuf], config: &SheetConfig) -> SheetPlan {
    let per_page = config.slots_per_page().max(1);
    let mut pages: Vec<PagePlan> = Vec::with_capacity(images.len().div_ceil(per_page).max(1));

    for (index, image) in images.iter().enumerate() {
        let slot = index % per_page;
        if slot == 0 {
            pages.push(PagePlan::default());
        }
        let Some(rect) = slot_rect(slot, config) else {
            continue;
        };
        if let Some(page) = pages.last_mut() {
            page.placements.push(Placement {
                image: image.clone(),
                slot,
                rect,
            });
        }
    }

    if pages.is_empty() {
        pages.push(PagePlan::default());
    }

    SheetPlan {
        page_width_pt: config.page_width_pt,
        page_height_pt: config.page_height_pt,
        draw_border: config.draw_border,
        pages,
    }
}
