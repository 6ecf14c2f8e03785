//! Outbound grid notifications.

use serde::Serialize;

use super::sort::Direction;

/// Emitted when the user changes the sort column or direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortChange {
    pub column_name: String,
    pub direction: Direction,
}

/// Emitted when the current page or the page size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationChange {
    pub current_page: usize,
    pub page_size: Option<usize>,
}

/// A notification queued by a grid for its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    Sort(SortChange),
    Pagination(PaginationChange),
}

impl From<SortChange> for GridEvent {
    fn from(event: SortChange) -> Self {
        GridEvent::Sort(event)
    }
}

impl From<PaginationChange> for GridEvent {
    fn from(event: PaginationChange) -> Self {
        GridEvent::Pagination(event)
    }
}
