//! Page-number windows for list views.

use medistore_api_types::PageMeta;

/// The page buttons to render around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// `current` clamped into `1..=total_pages` (1 when there are no pages).
    pub current: u64,
    pub total_pages: u64,
    pub pages: Vec<u64>,
    /// Pages exist before the first button.
    pub leading_ellipsis: bool,
    /// Pages exist after the last button.
    pub trailing_ellipsis: bool,
}

impl PageWindow {
    pub fn has_previous(&self) -> bool {
        self.total_pages > 0 && self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}

/// Centre at most `max_buttons` page numbers on `current`, shifting the
/// window inward at either edge.
pub fn page_window(current: u64, total_pages: u64, max_buttons: u64) -> PageWindow {
    if total_pages == 0 {
        return PageWindow {
            current: 1,
            total_pages,
            pages: Vec::new(),
            leading_ellipsis: false,
            trailing_ellipsis: false,
        };
    }

    let current = current.clamp(1, total_pages);
    let width = max_buttons.clamp(1, total_pages);

    let mut start = current.saturating_sub(width / 2).max(1);
    let mut end = start + width - 1;
    if end > total_pages {
        end = total_pages;
        start = end + 1 - width;
    }

    PageWindow {
        current,
        total_pages,
        pages: (start..=end).collect(),
        leading_ellipsis: start > 1,
        trailing_ellipsis: end < total_pages,
    }
}

/// Window for a list response's metadata; missing fields mean page 1 of 1.
pub fn window_for(meta: Option<&PageMeta>, max_buttons: u64) -> PageWindow {
    let current = meta.and_then(|meta| meta.page).unwrap_or(1);
    let total_pages = meta.and_then(PageMeta::total_pages).unwrap_or(1);
    page_window(current, total_pages, max_buttons)
}
