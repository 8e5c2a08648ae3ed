use crate::layout::PageGeometry;
use crate::types::*;

/// Calculate statistics for a packing run
pub fn calculate_statistics(pages: &[Page], geometry: &PageGeometry) -> PackStatistics {
    let mut images = 0;
    let mut shelves = 0;
    let mut forced_fits = 0;
    let mut placed_area: u64 = 0;

    for page in pages {
        images += page.placements.len();
        shelves += count_shelves(page);
        forced_fits += page.placements.iter().filter(|p| p.forced_fit).count();
        placed_area += page.placements.iter().map(Placement::area).sum::<u64>();
    }

    let usable_area = geometry.usable_width().max(0) as u64 * geometry.usable_height().max(0) as u64;
    let total_area = usable_area * pages.len() as u64;
    let coverage = if total_area == 0 {
        0.0
    } else {
        placed_area as f64 / total_area as f64
    };

    PackStatistics {
        images,
        pages: pages.len(),
        shelves,
        forced_fits,
        coverage,
    }
}

// Placements on one shelf share their top edge
fn count_shelves(page: &Page) -> usize {
    let mut shelf_tops: Vec<u32> = page.placements.iter().map(|p| p.y).collect();
    shelf_tops.dedup();
    shelf_tops.len()
}
