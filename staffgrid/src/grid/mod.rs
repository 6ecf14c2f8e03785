//! Sortable, paginated data grid.

mod column;
mod events;
mod paginate;
mod registry;
mod scroll;
mod sort;
mod source;
mod state;

pub use column::{Alignment, Column};
pub use events::{GridEvent, PaginationChange, SortChange};
pub use paginate::{
    AvailablePageSizes, PageSize, Pagination, ParsePageSizeError, STANDARD_PAGE_SIZES, paginate,
    total_pages,
};
pub use registry::{GridFactory, GridId};
pub use scroll::{SCROLL_DELAY, ScrollTarget};
pub use sort::{Direction, SortIndicator, SortState, compare_rows, sort_rows};
pub use source::{DataSource, RowStream, watch_stream};
pub use state::DataGrid;
