//! Pagination windows with ellipsis collapsing.
//!
//! ```rust
//! use blogdex_core::pagination::window;
//!
//! let w = window(160, 8, 6, 2);
//! assert_eq!(w.to_string(), "1 … 4 5 [6] 7 8 … 20");
//! assert!(w.has_multiple_pages());
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// One entry of a paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A 1-based page link.
    Page(usize),
    /// Collapsed run of pages.
    Ellipsis,
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(page) => serializer.serialize_u64(*page as u64),
            Self::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Ordered paginator entries for one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Entries in display order.
    pub tokens: Vec<PageToken>,
    /// Requested page.
    pub current: usize,
    /// Number of pages in the listing.
    pub total_pages: usize,
}

impl PageWindow {
    /// Whether a paginator should be shown at all.
    pub fn has_multiple_pages(&self) -> bool {
        self.tokens.len() > 1
    }

    /// Page numbers only, in order.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            PageToken::Page(p) => Some(*p),
            PageToken::Ellipsis => None,
        })
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match token {
                PageToken::Page(p) if *p == self.current => write!(f, "[{p}]")?,
                PageToken::Page(p) => write!(f, "{p}")?,
                PageToken::Ellipsis => f.write_str("…")?,
            }
        }
        Ok(())
    }
}

/// Number of pages needed for `total_items`, `0` when `per_page` is `0`.
pub const fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    }
}

/// Paginator entries around `current`.
///
/// Pages before the window collapse to `1 …` once `current` is more than
/// `visible_range + 1`; pages after it collapse to `… last` while `current`
/// is more than `visible_range` pages from the end. `current` is not
/// clamped, but no token ever falls outside `1..=total_pages`.
pub fn window(
    total_items: usize,
    per_page: usize,
    current: usize,
    visible_range: usize,
) -> PageWindow {
    let total = total_pages(total_items, per_page);
    let mut tokens = Vec::new();
    if total == 0 {
        return PageWindow {
            tokens,
            current,
            total_pages: total,
        };
    }

    let push_page = |tokens: &mut Vec<PageToken>, page: usize| {
        if !tokens.contains(&PageToken::Page(page)) {
            tokens.push(PageToken::Page(page));
        }
    };

    // Leading pages.
    if current > visible_range.saturating_add(1) {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
    } else {
        let end = current.min(visible_range.saturating_add(1)).min(total + 1);
        for page in 1..end {
            push_page(&mut tokens, page);
        }
    }

    // Window around the current page.
    let first = current.saturating_sub(visible_range).max(1);
    let last = current.saturating_add(visible_range).min(total);
    for page in first..=last {
        push_page(&mut tokens, page);
    }

    // Trailing pages.
    if current.saturating_add(visible_range) < total {
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total));
    } else {
        for page in current.saturating_add(1)..=total {
            push_page(&mut tokens, page);
        }
    }

    PageWindow {
        tokens,
        current,
        total_pages: total,
    }
}

/// Half-open index range of `page` (1-based) within a listing of `len` items.
///
/// Page `0` is treated as page `1`. Out-of-range pages give an empty range.
pub fn page_bounds(len: usize, per_page: usize, page: usize) -> Range<usize> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page);
    if per_page == 0 || start >= len {
        return len..len;
    }
    start..start.saturating_add(per_page).min(len)
}
