//! Grid state machine.

use std::collections::VecDeque;
use std::sync::Arc;

use super::column::Column;
use super::events::{GridEvent, PaginationChange, SortChange};
use super::paginate::{AvailablePageSizes, PageSize, Pagination, paginate};
use super::registry::GridId;
use super::scroll::{ScrollTarget, Scroller};
use super::sort::{Direction, SortIndicator, SortState, sort_rows};
use super::source::{DataSource, SourceAdapter};
use crate::value::GridRow;

/// A sortable, paginated view over a data source.
///
/// `DataGrid<T>` keeps sort and pagination state consistent across data
/// refreshes:
/// - Binds a plain collection or a stream of collections
/// - Sorts by one column at a time (nulls last, stable)
/// - Slices the sorted rows into pages
/// - Queues sort and pagination events for its owner
///
/// All operations run synchronously on the caller's thread. Stream emissions
/// are applied by [`poll_source`](Self::poll_source) or
/// [`next_emission`](Self::next_emission), each one atomically followed by a
/// recompute.
pub struct DataGrid<T: GridRow> {
    id: GridId,
    columns: Vec<Column>,
    sortable: bool,
    sort: SortState,
    pagination: Pagination,
    page_sizes: AvailablePageSizes,
    source: SourceAdapter<T>,
    paged: Vec<T>,
    events: VecDeque<GridEvent>,
    scroller: Scroller,
    dirty: bool,
}

impl<T: GridRow> DataGrid<T> {
    /// Create an unbound grid. Use [`GridFactory`](super::GridFactory) to
    /// get unique identifiers.
    pub fn new(id: GridId) -> Self {
        Self {
            id,
            columns: Vec::new(),
            sortable: true,
            sort: SortState::new(),
            pagination: Pagination::default(),
            page_sizes: AvailablePageSizes::new(),
            source: SourceAdapter::new(),
            paged: Vec::new(),
            events: VecDeque::new(),
            scroller: Scroller::default(),
            dirty: false,
        }
    }

    /// Set the column descriptors.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// Identifier for the page-size selector element.
    pub fn page_size_select_id(&self) -> String {
        self.id.page_size_select_id()
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Sets every input at once and binds the data source.
    pub fn configure(
        &mut self,
        data: impl Into<DataSource<T>>,
        page_size: Option<usize>,
        sortable: bool,
    ) {
        self.sortable = sortable;
        self.pagination.page_size = page_size;
        self.page_sizes.remember(page_size);
        self.set_data(data);
    }

    /// Replaces the data source.
    ///
    /// Any previous subscription is released before the new source is bound.
    pub fn set_data(&mut self, data: impl Into<DataSource<T>>) {
        self.source.bind(data.into());
        self.recompute();
    }

    /// Owner-side page-size change.
    ///
    /// Unlike [`set_page_size`](Self::set_page_size) this keeps the current
    /// page (clamped) and emits nothing.
    pub fn update_page_size_input(&mut self, page_size: Option<usize>) {
        self.pagination.page_size = page_size;
        self.page_sizes.remember(page_size);
        self.recompute();
    }

    /// Enables or disables sorting for the whole grid.
    ///
    /// An existing sort stays applied; only new sort requests are refused.
    pub fn set_sortable(&mut self, sortable: bool) {
        self.sortable = sortable;
        self.recompute();
    }

    pub fn sortable(&self) -> bool {
        self.sortable
    }

    /// Set the column descriptors.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.dirty = true;
    }

    /// Get the column descriptors.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column descriptor by property name.
    pub fn column(&self, property: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.property == property)
    }

    /// Registers the view container scrolled into view after paging.
    pub fn set_scroll_target(&mut self, target: &Arc<dyn ScrollTarget>) {
        self.scroller.set_target(target);
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Handles a sort request on a column header.
    ///
    /// Sorting the sorted column flips its direction; another column starts
    /// ascending. Returns `false` (and changes nothing) when the column or
    /// the grid is not sortable.
    pub fn on_sort(&mut self, column: &Column) -> bool {
        if !column.sortable || !self.sortable {
            return false;
        }
        self.sort.toggle(&column.property);
        let direction = self.sort.direction();
        log::debug!("{} sorted by {} {}", self.id, column.property, direction);
        self.events.push_back(
            SortChange {
                column_name: column.property.clone(),
                direction,
            }
            .into(),
        );
        self.recompute();
        true
    }

    /// Sorts by the column with the given property.
    ///
    /// Returns `false` if no such column is registered or it is not
    /// sortable.
    pub fn sort_by(&mut self, property: &str) -> bool {
        match self.column(property).cloned() {
            Some(column) => self.on_sort(&column),
            None => false,
        }
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort.column()
    }

    pub fn sort_direction(&self) -> Direction {
        self.sort.direction()
    }

    /// Header indicator for a column.
    pub fn sort_state_for(&self, column: &Column) -> SortIndicator {
        if !column.sortable || !self.sortable {
            return SortIndicator::None;
        }
        if self.sort.column() != Some(column.property.as_str()) {
            return SortIndicator::None;
        }
        match self.sort.direction() {
            Direction::Asc => SortIndicator::Ascending,
            Direction::Desc => SortIndicator::Descending,
            Direction::None => SortIndicator::None,
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Moves to a 1-based page.
    ///
    /// Out-of-range pages are ignored: nothing changes and no event is
    /// queued. On success a scroll into view is scheduled.
    pub fn change_page(&mut self, page: usize) -> bool {
        if !self.pagination.contains(page) {
            log::debug!(
                "{} ignoring page {} of {}",
                self.id,
                page,
                self.pagination.total_pages
            );
            return false;
        }
        self.pagination.current_page = page;
        self.push_pagination_event();
        self.recompute();
        self.scroller.schedule();
        true
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self) -> bool {
        self.change_page(self.pagination.current_page + 1)
    }

    /// Moves to the previous page, if there is one.
    pub fn previous_page(&mut self) -> bool {
        match self.pagination.current_page.checked_sub(1) {
            Some(page) => self.change_page(page),
            None => false,
        }
    }

    /// User page-size selection.
    ///
    /// Always resets to the first page, adds the size to the offered choices
    /// and queues a pagination event.
    pub fn set_page_size(&mut self, page_size: Option<usize>) {
        self.pagination.page_size = page_size;
        self.pagination.current_page = 1;
        self.page_sizes.remember(page_size);
        self.push_pagination_event();
        self.recompute();
        self.scroller.schedule();
    }

    /// User page-size selection from raw input.
    ///
    /// Empty, `null` and unparseable input turn paging off.
    pub fn set_page_size_input(&mut self, input: &str) {
        let PageSize(page_size) = PageSize::parse_lenient(input);
        self.set_page_size(page_size);
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn page_size(&self) -> Option<usize> {
        self.pagination.page_size
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Page sizes offered to the user, ascending.
    pub fn available_page_sizes(&self) -> Vec<usize> {
        self.page_sizes.sizes(self.pagination.page_size)
    }

    fn push_pagination_event(&mut self) {
        self.events.push_back(
            PaginationChange {
                current_page: self.pagination.current_page,
                page_size: self.pagination.page_size,
            }
            .into(),
        );
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Rows on the current page, sorted.
    pub fn paged_rows(&self) -> &[T] {
        &self.paged
    }

    /// The current collection, unsorted, as last received from the source.
    pub fn current_rows(&self) -> &[T] {
        self.source.current()
    }

    /// Number of rows in the current collection.
    pub fn row_count(&self) -> usize {
        self.source.current().len()
    }

    /// Returns `true` once a source other than [`DataSource::Empty`] is bound.
    pub fn is_bound(&self) -> bool {
        self.source.is_bound()
    }

    /// Applies stream emissions that are ready, without waiting.
    ///
    /// Returns `true` if the collection changed.
    pub fn poll_source(&mut self) -> bool {
        let replaced = self.source.poll();
        if replaced {
            self.recompute();
        }
        replaced
    }

    /// Waits for the next stream emission and applies it.
    ///
    /// Returns `false` when the stream completed. Never resolves while no
    /// stream is bound, so it can sit in a `select!` unconditionally.
    pub async fn next_emission(&mut self) -> bool {
        let replaced = self.source.next().await;
        if replaced {
            self.recompute();
        }
        replaced
    }

    /// Takes every queued event in emission order.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        self.events.drain(..).collect()
    }

    /// Releases the subscription and cancels pending scrolls.
    pub fn teardown(&mut self) {
        log::debug!("Tearing down {}", self.id);
        self.source.release();
        self.scroller.clear_target();
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Check if the output changed since the last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Sort, clamp the page, slice.
    fn recompute(&mut self) {
        let sorted = sort_rows(self.source.current(), &self.sort);
        self.pagination.update_total(sorted.len());
        self.paged = paginate(
            &sorted,
            self.pagination.page_size,
            self.pagination.current_page,
        )
        .to_vec();
        self.dirty = true;
        log::trace!(
            "{} recomputed: {} rows, page {}/{}",
            self.id,
            sorted.len(),
            self.pagination.current_page,
            self.pagination.total_pages
        );
    }
}

impl<T: GridRow> Drop for DataGrid<T> {
    fn drop(&mut self) {
        self.source.release();
    }
}

impl<T: GridRow> std::fmt::Debug for DataGrid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("id", &self.id)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("rows", &self.row_count())
            .finish()
    }
}
