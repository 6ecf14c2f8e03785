//! Grid identifiers.

use std::fmt;

/// Unique identifier of a grid created by a [`GridFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    pub fn get(&self) -> usize {
        self.0
    }

    /// Identifier for the page-size selector element of this grid.
    pub fn page_size_select_id(&self) -> String {
        format!("page-size-selector-{}", self.0)
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// Creates grids and hands out their identifiers.
///
/// The counter is owned by the factory, so separate views (or tests) never
/// share numbering.
#[derive(Debug, Default)]
pub struct GridFactory {
    next: usize,
}

impl GridFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identifier.
    pub fn next_id(&mut self) -> GridId {
        self.next += 1;
        GridId(self.next)
    }

    /// Creates an empty grid with a fresh identifier.
    pub fn create<T: crate::GridRow>(&mut self) -> super::DataGrid<T> {
        super::DataGrid::new(self.next_id())
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_per_factory() {
        let mut factory = GridFactory::new();
        let a = factory.next_id();
        let b = factory.next_id();
        assert_ne!(a, b);
        assert_eq!(factory.issued(), 2);
        assert_eq!(b.page_size_select_id(), "page-size-selector-2");
    }

    #[test]
    fn test_factories_number_independently() {
        let mut first = GridFactory::new();
        let mut second = GridFactory::new();
        first.next_id();
        assert_eq!(second.next_id().get(), 1);
    }
}
