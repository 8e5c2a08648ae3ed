use image_pack::*;
use std::collections::HashSet;

fn descriptors(sizes: &[(u32, u32)]) -> Vec<ImageDescriptor> {
    sizes
        .iter()
        .enumerate()
        .map(|(id, &(w, h))| ImageDescriptor::dimensions_only(id, w, h))
        .collect()
}

/// Small deterministic generator so the property tests need no extra crates
fn pseudo_random_sizes(count: usize, seed: u64) -> Vec<(u32, u32)> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u32
    };
    (0..count)
        .map(|_| (20 + next() % 900, 20 + next() % 900))
        .collect()
}

fn plan(sizes: &[(u32, u32)], geometry: &PageGeometry) -> Vec<Page> {
    plan_pages(&descriptors(sizes), geometry, OrderingPolicy::TallestFirst).unwrap()
}

#[test]
fn test_three_squares_share_one_shelf() {
    // 10 + 3 * (100 + 10) = 340
    let geometry = PageGeometry::new(340, 300, 10);
    let pages = plan(&[(100, 100), (100, 100), (100, 100)], &geometry);

    assert_eq!(pages.len(), 1);
    let xs: Vec<u32> = pages[0].placements.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![10, 120, 230]);
    assert!(pages[0].placements.iter().all(|p| p.y == 10));
}

#[test]
fn test_third_square_wraps_on_narrow_page() {
    // On a 300px page the third square would end at 330
    let geometry = PageGeometry::new(300, 300, 10);
    let pages = plan(&[(100, 100), (100, 100), (100, 100)], &geometry);

    assert_eq!(pages.len(), 1);
    let positions: Vec<(u32, u32)> = pages[0].placements.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(positions, vec![(10, 10), (120, 10), (10, 120)]);
}

#[test]
fn test_wide_image_falls_back_to_page_width() {
    let geometry = PageGeometry::new(300, 300, 10);
    let pages = plan(&[(1000, 50)], &geometry);

    assert_eq!(pages.len(), 1);
    let p = pages[0].placements[0];
    assert_eq!((p.x, p.y, p.width, p.height), (10, 10, 280, 14));
    assert!(p.forced_fit);
}

#[test]
fn test_wide_image_without_normalization_falls_back() {
    let geometry = PageGeometry::new(300, 300, 10);
    let packer = ShelfPacker::new(&geometry).unwrap();
    let pages = packer.pack(&[NormalizedSize {
        id: 0,
        width: 1000,
        height: 50,
    }]);

    let p = pages[0].placements[0];
    assert_eq!((p.x, p.y, p.width, p.height), (10, 10, 280, 14));
}

#[test]
fn test_five_strips_split_four_and_one() {
    let geometry = PageGeometry::new(300, 300, 10);
    let pages = plan(&[(250, 50); 5], &geometry);

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].placements.len(), 4);
    assert_eq!(pages[1].placements.len(), 1);

    let tops: Vec<u32> = pages[0].placements.iter().map(|p| p.y).collect();
    assert_eq!(tops, vec![10, 70, 130, 190]);
    assert_eq!(pages[1].placements[0].y, 10);
    assert_eq!(pages[0].index, 1);
    assert_eq!(pages[1].index, 2);
}

#[test]
fn test_empty_input_yields_no_pages() {
    let geometry = PageGeometry::new(300, 300, 10);
    let pages = plan_pages(&[], &geometry, OrderingPolicy::TallestFirst).unwrap();
    assert!(pages.is_empty());
}

#[test]
fn test_config_error_before_packing() {
    let geometry = PageGeometry::new(24, 300, 12);
    let result = plan_pages(&descriptors(&[(10, 10)]), &geometry, OrderingPolicy::TallestFirst);
    assert!(matches!(result, Err(PackError::Config(_))));

    // Rejected even when there is nothing to pack
    let result = plan_pages(&[], &geometry, OrderingPolicy::TallestFirst);
    assert!(matches!(result, Err(PackError::Config(_))));
}

#[test]
fn test_pages_preserve_tallest_first_order() {
    let geometry = PageGeometry::new(300, 300, 10);
    let pages = plan(&[(50, 20), (50, 80), (50, 40), (50, 80)], &geometry);

    let ids: Vec<usize> = pages
        .iter()
        .flat_map(|page| page.placements.iter().map(|p| p.id))
        .collect();
    assert_eq!(ids, vec![1, 3, 2, 0]);
}

#[test]
fn test_containment() {
    // A4 at 100 DPI with default padding and margin
    let geometry = PageGeometry::new(827, 1169, 12).with_normalization_margin(24);
    let pages = plan(&pseudo_random_sizes(60, 7), &geometry);

    for page in &pages {
        for p in &page.placements {
            assert!(p.x >= geometry.padding);
            assert!(p.y >= geometry.padding);
            assert!(p.right() <= geometry.width - geometry.padding, "{:?}", p);
            assert!(p.bottom() <= geometry.height - geometry.padding, "{:?}", p);
        }
    }
}

#[test]
fn test_non_overlap() {
    let geometry = PageGeometry::new(827, 1169, 12);
    let pages = plan(&pseudo_random_sizes(80, 11), &geometry);

    for page in &pages {
        for (i, a) in page.placements.iter().enumerate() {
            for b in &page.placements[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }
}

#[test]
fn test_completeness() {
    let sizes = pseudo_random_sizes(50, 3);
    let geometry = PageGeometry::new(600, 800, 12);
    let pages = plan(&sizes, &geometry);

    let ids: Vec<usize> = pages
        .iter()
        .flat_map(|page| page.placements.iter().map(|p| p.id))
        .collect();
    let unique: HashSet<usize> = ids.iter().copied().collect();

    assert_eq!(ids.len(), sizes.len());
    assert_eq!(unique, (0..sizes.len()).collect::<HashSet<_>>());
    assert!(pages.iter().all(|page| !page.placements.is_empty()));
}

#[test]
fn test_determinism() {
    let sizes = pseudo_random_sizes(40, 42);
    let geometry = PageGeometry::new(827, 1169, 12);

    let first = plan(&sizes, &geometry);
    let second = plan(&sizes, &geometry);
    assert_eq!(first, second);
}

#[test]
fn test_page_count_grows_monotonically() {
    let geometry = PageGeometry::new(400, 500, 12);
    let mut previous = 0;
    for count in 0..40 {
        let pages = plan(&vec![(120, 90); count], &geometry);
        assert!(
            pages.len() >= previous,
            "{} images gave {} pages, fewer than {}",
            count,
            pages.len(),
            previous
        );
        previous = pages.len();
    }
    assert!(previous > 1);
}

#[test]
fn test_page_count_grows_monotonically_with_mixed_sizes() {
    let geometry = PageGeometry::new(827, 1169, 12);
    for seed in 0..200 {
        let sizes = pseudo_random_sizes(12, seed);
        let mut previous = 0;
        for count in 0..=sizes.len() {
            let pages = plan(&sizes[..count], &geometry);
            assert!(
                pages.len() >= previous,
                "seed {}: first {} images gave {} pages, fewer than {}",
                seed,
                count,
                pages.len(),
                previous
            );
            previous = pages.len();
        }
    }
}

#[test]
fn test_input_order_policy_keeps_order() {
    let geometry = PageGeometry::new(300, 300, 10);
    let pages = plan_pages(
        &descriptors(&[(50, 20), (50, 80), (50, 40)]),
        &geometry,
        OrderingPolicy::InputOrder,
    )
    .unwrap();

    let ids: Vec<usize> = pages[0].placements.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}
