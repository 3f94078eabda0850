//! Pagination math
//!
//! Page counts, clamping, and the bounded window of page numbers shown
//! as navigation.

use serde::Serialize;

/// Most page numbers shown at once
pub const PAGE_WINDOW: u32 = 5;

/// Number of pages needed for `total` rows
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a page into `[1, max(1, total_pages)]`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers to display around `current`
///
/// Shows everything when there are at most five pages, pins to the first
/// or last five near either end, and otherwise centres on `current`.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }

    let current = clamp_page(current, total_pages);
    let half = PAGE_WINDOW / 2;

    let start = if current <= half + 1 {
        1
    } else if current >= total_pages - half {
        total_pages - PAGE_WINDOW + 1
    } else {
        current - half
    };

    (start..start + PAGE_WINDOW).collect()
}

/// Everything a view needs to draw pagination controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub window: Vec<u32>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(current: u32, total_items: u64, page_size: u32) -> Self {
        let total_pages = total_pages(total_items, page_size);
        let current = clamp_page(current, total_pages);

        Self {
            current,
            total_pages,
            total_items,
            window: page_window(current, total_pages),
            has_previous: current > 1,
            has_next: current < total_pages,
        }
    }
}
