//! Page size parsing, page slicing and the page-size choices.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

/// Page sizes every grid offers.
pub const STANDARD_PAGE_SIZES: [usize; 5] = [5, 10, 15, 25, 50];

/// Error returned when a page-size input is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid page size: {input:?}")]
pub struct ParsePageSizeError {
    /// The rejected input.
    pub input: String,
}

/// A parsed page-size selection.
///
/// `PageSize(None)` means "no paging": every row on a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSize(pub Option<usize>);

impl PageSize {
    /// Parses user input, degrading anything unusable to "no paging".
    ///
    /// Empty input, `null`, non-numbers and values <= 0 all yield
    /// `PageSize(None)`.
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }
}

impl FromStr for PageSize {
    type Err = ParsePageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(PageSize(None));
        }
        let value: f64 = trimmed.parse().map_err(|_| ParsePageSizeError {
            input: s.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ParsePageSizeError {
                input: s.to_string(),
            });
        }
        if value < 1.0 {
            return Ok(PageSize(None));
        }
        Ok(PageSize(Some(value.floor() as usize)))
    }
}

/// Returns the effective page size: `None` when paging is off.
pub fn effective_page_size(page_size: Option<usize>) -> Option<usize> {
    page_size.filter(|&size| size > 0)
}

/// Number of pages needed for `count` rows. Always at least 1.
pub fn total_pages(count: usize, page_size: Option<usize>) -> usize {
    match effective_page_size(page_size) {
        Some(size) => count.div_ceil(size).max(1),
        None => 1,
    }
}

/// Returns the rows visible on the 1-based `page`.
///
/// With paging off every row is visible. A page beyond the end yields an
/// empty slice; callers clamp the page first.
pub fn paginate<T>(rows: &[T], page_size: Option<usize>, page: usize) -> &[T] {
    let Some(size) = effective_page_size(page_size) else {
        return rows;
    };
    let start = page.saturating_sub(1).saturating_mul(size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

/// Current pagination position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Rows per page; `None` (or 0) means no paging.
    pub page_size: Option<usize>,
    /// 1-based current page.
    pub current_page: usize,
    /// Total pages, at least 1.
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(page_size: Option<usize>) -> Self {
        Self {
            page_size,
            current_page: 1,
            total_pages: 1,
        }
    }

    /// Recomputes the page count for `count` rows and pulls the current
    /// page back into range.
    pub fn update_total(&mut self, count: usize) {
        self.total_pages = total_pages(count, self.page_size);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    /// Returns `true` if `page` is a valid target.
    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None)
    }
}

/// The page sizes offered to the user.
///
/// Standard sizes plus every positive custom size ever configured, kept
/// ascending and duplicate-free.
#[derive(Debug, Clone, Default)]
pub struct AvailablePageSizes {
    custom: BTreeSet<usize>,
}

impl AvailablePageSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers `page_size` if it is positive and not a standard size.
    pub fn remember(&mut self, page_size: Option<usize>) {
        if let Some(size) = effective_page_size(page_size)
            && !STANDARD_PAGE_SIZES.contains(&size)
        {
            self.custom.insert(size);
        }
    }

    /// All choices, ascending, including the current size if positive.
    pub fn sizes(&self, current: Option<usize>) -> Vec<usize> {
        let mut all: BTreeSet<usize> = STANDARD_PAGE_SIZES.into_iter().collect();
        all.extend(self.custom.iter().copied());
        if let Some(size) = effective_page_size(current) {
            all.insert(size);
        }
        all.into_iter().collect()
    }
}
