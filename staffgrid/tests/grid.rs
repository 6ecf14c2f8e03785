use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use staffgrid::grid::{
    Column, DataSource, Direction, GridEvent, GridFactory, PaginationChange, ScrollTarget,
    SortChange, SortIndicator, watch_stream,
};
use staffgrid::{DataGrid, Row, Value};
use tokio::sync::watch;

fn row(id: i64, name: &str) -> Row {
    Row::new().set("id", id).set("name", name)
}

fn ids(grid: &DataGrid<Row>) -> Vec<Value> {
    grid.paged_rows().iter().map(|r| r.get("id").cloned().unwrap_or_default()).collect()
}

fn grid() -> DataGrid<Row> {
    GridFactory::new().create()
}

fn id_column() -> Column {
    Column::new("id", "ID")
}

struct CountingTarget(AtomicUsize);

impl ScrollTarget for CountingTarget {
    fn scroll_into_view(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_array_data_is_paginated() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B"), row(3, "C")], Some(2), true);

    assert!(grid.is_bound());
    assert_eq!(grid.paged_rows().len(), 2);
    assert_eq!(grid.total_pages(), 2);
    assert_eq!(ids(&grid), vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_stream_data_is_paginated() {
    let (_tx, rx) = watch::channel(vec![row(1, "A"), row(2, "B"), row(3, "C")]);
    let mut grid = grid();
    grid.configure(DataSource::Stream(watch_stream(rx)), Some(2), true);

    assert_eq!(grid.paged_rows().len(), 2);
    assert_eq!(grid.total_pages(), 2);
    assert_eq!(ids(&grid), vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_empty_source_is_single_empty_page() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);
    grid.change_page(2);

    grid.set_data(DataSource::Empty);
    assert!(!grid.is_bound());
    assert!(grid.paged_rows().is_empty());
    assert_eq!(grid.total_pages(), 1);
    assert_eq!(grid.current_page(), 1);
}

#[test]
fn test_stream_emissions_keep_sort_and_page() {
    let (tx, rx) = watch::channel(vec![row(3, "C"), row(1, "A")]);
    let mut grid = grid().with_columns(vec![id_column()]);
    grid.configure(DataSource::Stream(watch_stream(rx)), Some(2), true);
    grid.sort_by("id");
    assert_eq!(ids(&grid), vec![Value::Int(1), Value::Int(3)]);

    tx.send(vec![row(5, "E"), row(2, "B"), row(4, "D"), row(1, "A")])
        .unwrap();
    assert!(grid.poll_source());
    assert_eq!(grid.sort_column(), Some("id"));
    assert_eq!(grid.total_pages(), 2);
    assert_eq!(ids(&grid), vec![Value::Int(1), Value::Int(2)]);

    grid.change_page(2);
    tx.send(vec![row(9, "I")]).unwrap();
    grid.poll_source();
    // Collection shrank to one page: the page is pulled back into range
    assert_eq!(grid.current_page(), 1);
    assert_eq!(ids(&grid), vec![Value::Int(9)]);
}

#[test]
fn test_rebinding_releases_old_stream() {
    let (old_tx, old_rx) = watch::channel(vec![row(1, "A")]);
    let mut grid = grid();
    grid.set_data(DataSource::Stream(watch_stream(old_rx)));
    grid.set_data(vec![row(7, "G")]);

    assert!(old_tx.send(vec![row(2, "B")]).is_err());
    assert!(!grid.poll_source());
    assert_eq!(ids(&grid), vec![Value::Int(7)]);
}

#[test]
fn test_page_size_change_does_not_resubscribe() {
    let (tx, rx) = watch::channel(vec![row(1, "A"), row(2, "B"), row(3, "C")]);
    let mut grid = grid();
    grid.configure(DataSource::Stream(watch_stream(rx)), Some(2), true);
    assert_eq!(tx.receiver_count(), 1);

    grid.update_page_size_input(Some(1));
    grid.set_sortable(false);
    assert_eq!(tx.receiver_count(), 1);
    assert_eq!(grid.total_pages(), 3);
}

#[test]
fn test_teardown_releases_subscription() {
    let (tx, rx) = watch::channel(vec![row(1, "A")]);
    let mut grid = grid();
    grid.set_data(DataSource::Stream(watch_stream(rx)));
    grid.teardown();
    assert_eq!(tx.receiver_count(), 0);
}

#[tokio::test]
async fn test_next_emission_recomputes() {
    let (tx, rx) = watch::channel(Vec::<Row>::new());
    let mut grid = grid();
    grid.configure(DataSource::Stream(watch_stream(rx)), Some(10), true);
    assert!(grid.paged_rows().is_empty());

    tokio::spawn(async move {
        tx.send(vec![row(1, "A"), row(2, "B")]).unwrap();
        // Keep the sender alive until the grid has seen the value
        tokio::time::sleep(Duration::from_millis(10)).await;
    });
    assert!(grid.next_emission().await);
    assert_eq!(grid.paged_rows().len(), 2);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_by_column() {
    let mut grid = grid();
    grid.configure(vec![row(2, "B"), row(1, "A")], None, true);

    assert!(grid.on_sort(&id_column()));
    assert_eq!(grid.sort_column(), Some("id"));
    assert_eq!(grid.sort_direction(), Direction::Asc);
    assert_eq!(grid.paged_rows()[0].get("id"), Some(&Value::Int(1)));
}

#[test]
fn test_same_column_toggles_direction() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], None, true);

    grid.on_sort(&id_column());
    grid.on_sort(&id_column());
    assert_eq!(grid.sort_direction(), Direction::Desc);
    assert_eq!(ids(&grid), vec![Value::Int(2), Value::Int(1)]);

    grid.on_sort(&id_column());
    assert_eq!(grid.sort_direction(), Direction::Asc);
}

#[test]
fn test_sort_emits_event() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], None, true);
    grid.on_sort(&id_column());

    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Sort(SortChange {
            column_name: "id".into(),
            direction: Direction::Asc,
        })]
    );
    assert!(grid.drain_events().is_empty());
}

#[test]
fn test_non_sortable_column_or_grid_is_ignored() {
    let mut grid = grid();
    grid.configure(vec![row(2, "B"), row(1, "A")], None, true);

    assert!(!grid.on_sort(&Column::new("email", "Email").unsortable()));
    grid.set_sortable(false);
    assert!(!grid.on_sort(&id_column()));

    assert_eq!(grid.sort_column(), None);
    assert_eq!(grid.sort_direction(), Direction::None);
    assert!(grid.drain_events().is_empty());
    assert_eq!(ids(&grid), vec![Value::Int(2), Value::Int(1)]);
}

#[test]
fn test_sort_by_unknown_property_is_ignored() {
    let mut grid = grid().with_columns(vec![id_column()]);
    grid.configure(vec![row(2, "B"), row(1, "A")], None, true);
    assert!(!grid.sort_by("salary"));
    assert!(grid.sort_by("id"));
}

#[test]
fn test_sort_state_for_column() {
    let name = Column::new("name", "Name");
    let mut grid = grid();
    grid.configure(vec![row(1, "A")], None, true);
    assert_eq!(grid.sort_state_for(&id_column()), SortIndicator::None);

    grid.on_sort(&id_column());
    assert_eq!(grid.sort_state_for(&id_column()), SortIndicator::Ascending);
    assert_eq!(grid.sort_state_for(&name), SortIndicator::None);

    grid.on_sort(&id_column());
    assert_eq!(grid.sort_state_for(&id_column()).as_str(), "descending");

    grid.set_sortable(false);
    assert_eq!(grid.sort_state_for(&id_column()), SortIndicator::None);
}

#[test]
fn test_sort_applies_across_pages() {
    let mut grid = grid();
    grid.configure(
        vec![row(4, "D"), row(2, "B"), row(5, "E"), row(1, "A"), row(3, "C")],
        Some(2),
        true,
    );
    grid.on_sort(&id_column());
    grid.on_sort(&id_column());
    assert_eq!(ids(&grid), vec![Value::Int(5), Value::Int(4)]);
    grid.change_page(3);
    assert_eq!(ids(&grid), vec![Value::Int(1)]);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_change_page_emits_event() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);

    assert!(grid.change_page(2));
    assert_eq!(grid.current_page(), 2);
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Pagination(PaginationChange {
            current_page: 2,
            page_size: Some(1),
        })]
    );
}

#[test]
fn test_out_of_range_page_is_ignored() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);

    assert!(!grid.change_page(0));
    assert_eq!(grid.current_page(), 1);
    assert!(grid.change_page(2));
    assert!(!grid.change_page(3));
    assert_eq!(grid.current_page(), 2);
    assert_eq!(grid.drain_events().len(), 1);
}

#[test]
fn test_next_and_previous_page() {
    let mut grid = grid();
    grid.configure((1..=5).map(|i| row(i, "x")).collect::<Vec<_>>(), Some(2), true);

    assert!(!grid.previous_page());
    assert!(grid.next_page());
    assert!(grid.next_page());
    assert!(!grid.next_page());
    assert_eq!(grid.current_page(), 3);
    assert!(grid.previous_page());
    assert_eq!(grid.current_page(), 2);
}

#[test]
fn test_set_page_size_resets_page() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B"), row(3, "C")], Some(1), true);
    grid.change_page(3);
    grid.drain_events();

    grid.set_page_size_input("2");
    assert_eq!(grid.page_size(), Some(2));
    assert_eq!(grid.current_page(), 1);
    assert_eq!(grid.total_pages(), 2);
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Pagination(PaginationChange {
            current_page: 1,
            page_size: Some(2),
        })]
    );
}

#[test]
fn test_empty_page_size_turns_paging_off() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);

    grid.set_page_size_input("");
    assert_eq!(grid.page_size(), None);
    assert_eq!(grid.current_page(), 1);
    assert_eq!(grid.total_pages(), 1);
    assert_eq!(grid.paged_rows().len(), 2);

    grid.set_page_size_input("lots");
    assert_eq!(grid.page_size(), None);
}

#[test]
fn test_available_page_sizes_include_custom() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A")], Some(7), true);
    assert_eq!(grid.available_page_sizes(), vec![5, 7, 10, 15, 25, 50]);

    grid.set_page_size(Some(3));
    assert_eq!(grid.available_page_sizes(), vec![3, 5, 7, 10, 15, 25, 50]);

    // Custom sizes stay on offer after switching away
    grid.set_page_size(Some(10));
    assert_eq!(grid.available_page_sizes(), vec![3, 5, 7, 10, 15, 25, 50]);
}

#[test]
fn test_page_size_select_id() {
    let mut factory = GridFactory::new();
    let first: DataGrid<Row> = factory.create();
    let second: DataGrid<Row> = factory.create();
    assert!(first.page_size_select_id().starts_with("page-size-selector-"));
    assert_ne!(first.page_size_select_id(), second.page_size_select_id());
}

#[test]
fn test_dirty_flag_tracks_output() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);
    assert!(grid.is_dirty());
    grid.clear_dirty();

    grid.change_page(5);
    assert!(!grid.is_dirty());
    grid.change_page(2);
    assert!(grid.is_dirty());
}

// ============================================================================
// Scrolling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_page_change_scrolls_into_view() {
    let target = Arc::new(CountingTarget(AtomicUsize::new(0)));
    let dyn_target: Arc<dyn ScrollTarget> = target.clone();
    let mut grid = grid();
    grid.set_scroll_target(&dyn_target);
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);

    grid.change_page(2);
    assert_eq!(target.0.load(Ordering::SeqCst), 0);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(target.0.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_page_changes_scroll_once() {
    let target = Arc::new(CountingTarget(AtomicUsize::new(0)));
    let dyn_target: Arc<dyn ScrollTarget> = target.clone();
    let mut grid = grid();
    grid.set_scroll_target(&dyn_target);
    grid.configure((1..=4).map(|i| row(i, "x")).collect::<Vec<_>>(), Some(1), true);

    grid.change_page(2);
    grid.change_page(3);
    grid.change_page(4);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(target.0.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_scroll() {
    let target = Arc::new(CountingTarget(AtomicUsize::new(0)));
    let dyn_target: Arc<dyn ScrollTarget> = target.clone();
    let mut grid = grid();
    grid.set_scroll_target(&dyn_target);
    grid.configure((1..=4).map(|i| row(i, "x")).collect::<Vec<_>>(), Some(1), true);

    assert!(grid.change_page(2));
    grid.teardown();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(target.0.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_scroll_target_is_tolerated() {
    let mut grid = grid();
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);
    assert!(grid.change_page(2));

    let target: Arc<dyn ScrollTarget> = Arc::new(CountingTarget(AtomicUsize::new(0)));
    grid.set_scroll_target(&target);
    drop(target);
    assert!(grid.change_page(1));
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[test]
fn test_page_change_without_runtime() {
    let target: Arc<dyn ScrollTarget> = Arc::new(CountingTarget(AtomicUsize::new(0)));
    let mut grid = grid();
    grid.set_scroll_target(&target);
    grid.configure(vec![row(1, "A"), row(2, "B")], Some(1), true);
    assert!(grid.change_page(2));
}
