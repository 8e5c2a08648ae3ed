//! Shelf packing
//!
//! Images are laid out left-to-right in horizontal shelves; shelves stack
//! top-to-bottom on a page; a new page starts when the next shelf no longer
//! fits. Packing is greedy and keeps the order it is given.
//!
//! The running cursors live in an explicit [`ShelfState`] that is threaded
//! through [`ShelfPacker::fill_shelf`], so each shelf decision can be
//! inspected on its own.

use crate::types::{NormalizedSize, Page, Placement, Result};

use super::PageGeometry;
use super::normalize::scale_dimension;

/// Cursor state while packing a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfState {
    /// Horizontal cursor: where the next image on the current shelf would go
    pub cursor_x: u32,
    /// Vertical cursor: top edge of the next shelf
    pub cursor_y: u32,
    /// Height of the most recently filled shelf
    pub shelf_height: u32,
    /// 1-based index of the page being filled
    pub page_index: usize,
}

/// One filled shelf and the state after it
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf {
    /// Top edge of the shelf
    pub top: u32,
    /// Height of the tallest image on the shelf
    pub height: u32,
    pub placements: Vec<Placement>,
    /// Cursor state once the shelf is committed
    pub next: ShelfState,
}

/// Greedy shelf packer for a fixed page geometry
#[derive(Debug, Clone, Copy)]
pub struct ShelfPacker {
    page_width: u32,
    page_height: u32,
    padding: u32,
    usable_width: u32,
}

impl ShelfPacker {
    /// Create a packer, rejecting pages with no usable area.
    pub fn new(geometry: &PageGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self {
            page_width: geometry.width,
            page_height: geometry.height,
            padding: geometry.padding,
            usable_width: geometry.usable_width() as u32,
        })
    }

    /// State at the top of a fresh page
    pub fn start_page(&self, page_index: usize) -> ShelfState {
        ShelfState {
            cursor_x: self.padding,
            cursor_y: self.padding,
            shelf_height: 0,
            page_index,
        }
    }

    /// Whether another shelf may start at the state's vertical cursor
    pub fn page_has_room(&self, state: &ShelfState) -> bool {
        state.cursor_y < self.page_height - self.padding
    }

    /// Whether a shelf ends above the bottom padding
    pub fn fits_on_page(&self, shelf: &Shelf) -> bool {
        shelf.top as u64 + shelf.height as u64 + self.padding as u64 <= self.page_height as u64
    }

    /// Fill one shelf at `state.cursor_y` from the front of `pending`.
    ///
    /// Images are taken while `width + x + padding <= page_width`. If not even
    /// the first image fits, it is scaled down to exactly the usable page
    /// width and becomes the shelf's only occupant, so a non-empty `pending`
    /// always yields at least one placement.
    pub fn fill_shelf(&self, state: ShelfState, pending: &[NormalizedSize]) -> Shelf {
        let top = state.cursor_y;
        let mut x = self.padding;
        let mut shelf_height = 0;
        let mut placements = Vec::new();

        for size in pending {
            if size.width as u64 + x as u64 + self.padding as u64 > self.page_width as u64 {
                break;
            }
            placements.push(Placement {
                id: size.id,
                x,
                y: top,
                width: size.width,
                height: size.height,
                forced_fit: false,
            });
            x += size.width + self.padding;
            shelf_height = shelf_height.max(size.height);
        }

        if placements.is_empty() {
            if let Some(size) = pending.first() {
                let placement = self.force_fit(size, top);
                x = placement.right() + self.padding;
                shelf_height = placement.height;
                placements.push(placement);
            }
        }

        Shelf {
            top,
            height: shelf_height,
            placements,
            next: ShelfState {
                cursor_x: x,
                cursor_y: top.saturating_add(shelf_height).saturating_add(self.padding),
                shelf_height,
                page_index: state.page_index,
            },
        }
    }

    /// Pack a whole page from the front of `pending`.
    ///
    /// The first shelf is always committed, even when it is taller than the
    /// page. Later shelves are committed only while they end above the
    /// bottom padding; remaining space is never backfilled.
    pub fn pack_page(&self, page_index: usize, pending: &[NormalizedSize]) -> Page {
        let mut state = self.start_page(page_index);
        let mut placements: Vec<Placement> = Vec::new();
        let mut rest = pending;

        while !rest.is_empty() && self.page_has_room(&state) {
            let shelf = self.fill_shelf(state, rest);

            if !self.fits_on_page(&shelf) {
                if !placements.is_empty() {
                    log::debug!(
                        "Page {}: shelf at y={} (height {}) does not fit, closing page",
                        page_index,
                        shelf.top,
                        shelf.height
                    );
                    break;
                }
                log::warn!(
                    "Page {}: shelf of height {} exceeds the page height {}",
                    page_index,
                    shelf.height,
                    self.page_height
                );
            }

            log::debug!(
                "Page {}: shelf at y={} holds {} image(s), height {}",
                page_index,
                shelf.top,
                shelf.placements.len(),
                shelf.height
            );
            rest = &rest[shelf.placements.len()..];
            state = shelf.next;
            placements.extend(shelf.placements);
        }

        Page {
            index: page_index,
            placements,
        }
    }

    /// Pack all sizes into pages, preserving their order.
    pub fn pack(&self, sizes: &[NormalizedSize]) -> Vec<Page> {
        let mut pages = Vec::new();
        let mut rest = sizes;

        while !rest.is_empty() {
            let page = self.pack_page(pages.len() + 1, rest);
            rest = &rest[page.placements.len()..];
            pages.push(page);
        }

        log::info!("Packed {} image(s) into {} page(s)", sizes.len(), pages.len());
        pages
    }

    fn force_fit(&self, size: &NormalizedSize, top: u32) -> Placement {
        let scale = self.usable_width as f64 / size.width as f64;
        let height = scale_dimension(size.height, scale);
        log::warn!(
            "Image {} ({}x{}) is wider than the usable page width, scaling to {}x{}",
            size.id,
            size.width,
            size.height,
            self.usable_width,
            height
        );
        Placement {
            id: size.id,
            x: self.padding,
            y: top,
            width: self.usable_width,
            height,
            forced_fit: true,
        }
    }
}
