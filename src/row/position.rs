//! Vertical positioning: pagination offset, height scaling, style output.

use crate::dom::{Dom, NodeId};

use super::node::RowNode;

/// Rows animating in or out are kept within this many pixels of the viewport
/// so the slide stays short.
pub const ANIMATION_BOUNDS_PX: f64 = 100.0;

/// The row model and pagination proxy as seen by a row controller.
pub trait PaginationModel {
    fn current_page(&self) -> usize;

    /// Index of the first row on the current page.
    fn page_first_row(&self) -> usize;

    /// Index of the last row on the current page.
    fn page_last_row(&self) -> usize;

    /// Pixel offset of the current page inside the full row list.
    fn pixel_offset(&self) -> f64;

    /// Map a logical pixel offset onto the (possibly height-capped) scroll
    /// surface.
    fn real_pixel_position(&self, pixels: f64) -> f64;

    /// Top and bottom of the vertical scroll viewport, in page pixels.
    fn vertical_scroll_range(&self) -> (f64, f64);
}

/// Shift a logical offset into page space. Pinned rows are not paginated.
///
/// With `reverse`, map page space back to the full row list.
pub fn apply_pagination_offset(
    row: &RowNode,
    pagination: &dyn PaginationModel,
    pixels: f64,
    reverse: bool,
) -> f64 {
    if row.is_pinned() {
        return pixels;
    }
    let offset = pagination.pixel_offset();
    if reverse {
        pixels + offset
    } else {
        pixels - offset
    }
}

/// Final pixel position for `pixels`: pagination offset, then scaling.
pub fn row_top_pixels(row: &RowNode, pagination: &dyn PaginationModel, pixels: f64) -> f64 {
    let paged = apply_pagination_offset(row, pagination, pixels, false);
    if row.is_pinned() {
        paged
    } else {
        pagination.real_pixel_position(paged)
    }
}

/// Clamp an offset to the viewport plus [`ANIMATION_BOUNDS_PX`] on each side.
pub fn clamp_to_viewport(row: &RowNode, pagination: &dyn PaginationModel, pixels: f64) -> f64 {
    let (top, bottom) = pagination.vertical_scroll_range();
    let min = apply_pagination_offset(row, pagination, top, true) - ANIMATION_BOUNDS_PX;
    let max = apply_pagination_offset(row, pagination, bottom, true) + ANIMATION_BOUNDS_PX;
    pixels.max(min).min(max)
}

/// Format a pixel value the way it is written into inline styles.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Write a vertical position onto every element, either as `top` or as a
/// `translateY` transform.
pub fn write_row_top(dom: &mut Dom, elements: &[NodeId], pixels: f64, use_top: bool) {
    let value = px(pixels);
    for &element in elements {
        let Some(data) = dom.get_mut(element) else {
            continue;
        };
        if use_top {
            data.set_style("top", value.clone());
        } else {
            data.set_style("transform", format!("translateY({value})"));
        }
    }
}
