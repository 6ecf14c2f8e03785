//! Key bindings and grid actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use staffgrid::{DataGrid, GridRow};

/// Something the focused grid should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    NextPage,
    PreviousPage,
    /// Sort by the n-th column (0-based).
    SortColumn(usize),
    GrowPageSize,
    ShrinkPageSize,
    PagingOff,
}

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    Grid(GridAction),
    /// Scroll the view by a number of lines.
    Scroll(isize),
    ScrollTop,
}

/// Maps a key press to an action.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::BackTab => Action::FocusNext,
        KeyCode::Right | KeyCode::Char('l') => Action::Grid(GridAction::NextPage),
        KeyCode::Left | KeyCode::Char('h') => Action::Grid(GridAction::PreviousPage),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Grid(GridAction::GrowPageSize),
        KeyCode::Char('-') => Action::Grid(GridAction::ShrinkPageSize),
        KeyCode::Char('0') => Action::Grid(GridAction::PagingOff),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            Action::Grid(GridAction::SortColumn(index))
        }
        KeyCode::Down | KeyCode::Char('j') => Action::Scroll(1),
        KeyCode::Up | KeyCode::Char('k') => Action::Scroll(-1),
        KeyCode::PageDown => Action::Scroll(10),
        KeyCode::PageUp => Action::Scroll(-10),
        KeyCode::Home | KeyCode::Char('g') => Action::ScrollTop,
        _ => return None,
    };
    Some(action)
}

/// Applies an action to a grid. Returns `true` if the grid accepted it.
pub fn apply<T: GridRow>(grid: &mut DataGrid<T>, action: GridAction) -> bool {
    match action {
        GridAction::NextPage => grid.next_page(),
        GridAction::PreviousPage => grid.previous_page(),
        GridAction::SortColumn(index) => match grid.columns().get(index).cloned() {
            Some(column) => grid.on_sort(&column),
            None => false,
        },
        GridAction::GrowPageSize => {
            let sizes = grid.available_page_sizes();
            let next = match grid.page_size().filter(|&s| s > 0) {
                None => sizes.first().copied(),
                Some(current) => sizes.into_iter().find(|&s| s > current),
            };
            match next {
                Some(size) => {
                    grid.set_page_size(Some(size));
                    true
                }
                None => false,
            }
        }
        GridAction::ShrinkPageSize => {
            let Some(current) = grid.page_size().filter(|&s| s > 0) else {
                return false;
            };
            match grid.available_page_sizes().into_iter().rev().find(|&s| s < current) {
                Some(size) => {
                    grid.set_page_size(Some(size));
                    true
                }
                None => false,
            }
        }
        GridAction::PagingOff => {
            if grid.page_size().is_none() {
                return false;
            }
            grid.set_page_size_input("");
            true
        }
    }
}
