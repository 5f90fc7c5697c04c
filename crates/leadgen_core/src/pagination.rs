/// One slot in the compact pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(u32),
    /// Non-interactive gap marker.
    Ellipsis,
}

/// Compact page list for `current` out of `total` pages.
///
/// Up to seven pages are listed in full. Beyond that the first and last pages
/// are always present and the neighbourhood of `current` is shown between
/// ellipses.
pub fn page_range(current: u32, total: u32) -> Vec<PageEntry> {
    use PageEntry::{Ellipsis, Page};

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }
    if current <= 3 {
        return vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)];
    }
    if current >= total - 2 {
        return vec![
            Page(1),
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ];
    }
    vec![
        Page(1),
        Ellipsis,
        Page(current - 1),
        Page(current),
        Page(current + 1),
        Ellipsis,
        Page(total),
    ]
}

/// 1-based inclusive range of records shown on `page`.
pub fn display_range(page: u32, per_page: u32, total: u64) -> (u64, u64) {
    let page = u64::from(page.max(1));
    let per_page = u64::from(per_page);
    let start = (page - 1) * per_page + 1;
    let end = (page * per_page).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageEntry::{Ellipsis, Page};

    fn numbers(entries: &[PageEntry]) -> Vec<u32> {
        entries
            .iter()
            .filter_map(|entry| match entry {
                Page(n) => Some(*n),
                Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(page_range(1, 1), vec![Page(1)]);
        assert_eq!(numbers(&page_range(4, 7)), (1..=7).collect::<Vec<_>>());
        assert!(page_range(1, 0).is_empty());
    }

    #[test]
    fn near_start_near_end_and_middle_shapes() {
        assert_eq!(
            page_range(2, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_range(19, 20),
            vec![Page(1), Ellipsis, Page(17), Page(18), Page(19), Page(20)]
        );
        assert_eq!(
            page_range(10, 20),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn every_shape_is_well_formed() {
        for total in 1..=40u32 {
            for current in 1..=total {
                let entries = page_range(current, total);
                let pages = numbers(&entries);

                assert!(entries.len() <= 7, "total={total} current={current}");
                if total <= 7 {
                    assert_eq!(entries.len() as u32, total);
                }
                assert_eq!(pages.first(), Some(&1));
                assert_eq!(pages.last(), Some(&total));
                assert!(pages.contains(&current), "total={total} current={current}");
                assert!(pages.windows(2).all(|w| w[0] < w[1]));

                for (i, entry) in entries.iter().enumerate() {
                    if *entry != Ellipsis {
                        continue;
                    }
                    assert!(i > 0 && i + 1 < entries.len());
                    match (entries[i - 1], entries[i + 1]) {
                        (Page(before), Page(after)) => assert!(after > before + 1),
                        other => panic!("ellipsis next to {other:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn range_clamps_to_total() {
        assert_eq!(display_range(1, 25, 40), (1, 25));
        assert_eq!(display_range(2, 25, 40), (26, 40));
        assert_eq!(display_range(0, 25, 3), (1, 3));
    }
}
