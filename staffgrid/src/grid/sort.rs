//! Sort direction, sort state and the row comparator.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::value::GridRow;

/// Sort direction for a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[serde(rename = "asc")]
    Asc,
    /// Descending order (Z-A, 9-0).
    #[serde(rename = "desc")]
    Desc,
    /// Unsorted.
    #[default]
    #[serde(rename = "")]
    None,
}

impl Direction {
    /// String form used in events (`asc`, `desc`, or empty).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
            Direction::None => "",
        }
    }

    /// The opposite direction. `None` stays `None`.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
            Direction::None => Direction::None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessibility-style sort indicator for a single column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    None,
}

impl SortIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortIndicator::Ascending => "ascending",
            SortIndicator::Descending => "descending",
            SortIndicator::None => "none",
        }
    }
}

/// Which column the grid is sorted by, and how.
///
/// The direction is [`Direction::None`] exactly when no column is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    column: Option<String>,
    direction: Direction,
}

impl SortState {
    /// Unsorted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted by `column` in `direction`. A `None` direction yields the
    /// unsorted state.
    pub fn by(column: impl Into<String>, direction: Direction) -> Self {
        if direction == Direction::None {
            return Self::new();
        }
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if rows are reordered by this state.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != Direction::None
    }

    /// Toggle sort for a column.
    ///
    /// The sorted column flips between ascending and descending; any other
    /// column starts ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = match self.direction {
                Direction::Asc => Direction::Desc,
                _ => Direction::Asc,
            };
        } else {
            self.column = Some(column.to_string());
            self.direction = Direction::Asc;
        }
    }

    /// Clear sort state.
    pub fn clear(&mut self) {
        self.column = None;
        self.direction = Direction::None;
    }
}

/// Compares two rows by a field.
///
/// Nulls always sink to the end regardless of direction; the direction only
/// flips the outcome for two non-null values. `Direction::None` compares
/// everything equal.
pub fn compare_rows<T: GridRow>(a: &T, b: &T, field: &str, direction: Direction) -> Ordering {
    if direction == Direction::None {
        return Ordering::Equal;
    }
    let a = a.field(field);
    let b = b.field(field);
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.cmp_non_null(&b);
            if direction == Direction::Desc {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

/// Returns a sorted copy of `rows`.
///
/// The sort is stable: rows that compare equal keep their relative order.
/// An inactive state returns the rows in their original order.
pub fn sort_rows<T: GridRow>(rows: &[T], state: &SortState) -> Vec<T> {
    let mut sorted = rows.to_vec();
    if let Some(column) = state.column()
        && state.direction() != Direction::None
    {
        sorted.sort_by(|a, b| compare_rows(a, b, column, state.direction()));
    }
    sorted
}
