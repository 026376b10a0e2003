use proptest::prelude::*;

use ancr_render::{fit, page, page_count, paginate, shorten_url};

proptest! {
    /// paginate yields ceil(N/P) pages for any non-empty list.
    #[test]
    fn page_count_matches_paginate(items in prop::collection::vec(0u32..1000, 0..200),
                                   page_size in 1usize..20) {
        let pages = paginate(&items, page_size);
        prop_assert_eq!(pages.len(), page_count(items.len(), page_size));
    }

    /// Concatenating all pages reproduces the original list order.
    #[test]
    fn pages_concatenate_to_original(items in prop::collection::vec(0u32..1000, 0..200),
                                     page_size in 1usize..20) {
        let pages = paginate(&items, page_size);
        let rejoined: Vec<u32> = pages.into_iter().flatten().copied().collect();
        prop_assert_eq!(rejoined, items);
    }

    /// Every page except possibly the last is exactly page_size long, and
    /// the last is never empty.
    #[test]
    fn page_sizes_are_exact(items in prop::collection::vec(0u32..1000, 1..200),
                            page_size in 1usize..20) {
        let pages = paginate(&items, page_size);
        let last = pages.len() - 1;
        for (i, chunk) in pages.iter().enumerate() {
            if i < last {
                prop_assert_eq!(chunk.len(), page_size);
            } else {
                prop_assert!(!chunk.is_empty());
                prop_assert!(chunk.len() <= page_size);
            }
        }
    }

    /// Indexed page access agrees with paginate.
    #[test]
    fn indexed_page_matches_paginate(items in prop::collection::vec(0u32..1000, 1..200),
                                     page_size in 1usize..20) {
        let pages = paginate(&items, page_size);
        for (i, chunk) in pages.iter().enumerate() {
            prop_assert_eq!(page(&items, i + 1, page_size), *chunk);
        }
    }

    /// Shortened URLs never exceed the limit plus the ellipsis.
    #[test]
    fn shortened_urls_are_bounded(url in "[a-z:/._%-]{0,120}", max_len in 4usize..80) {
        let short = shorten_url(&url, max_len);
        prop_assert!(short.chars().count() <= max_len + 3);
    }

    /// Fitted cells are always exactly the requested width.
    #[test]
    fn fitted_cells_have_fixed_width(s in "\\PC{0,60}", width in 1usize..40) {
        prop_assert_eq!(fit(&s, width).chars().count(), width);
    }
}
