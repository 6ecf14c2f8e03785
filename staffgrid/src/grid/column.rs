//! Column descriptors.

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column configuration.
///
/// A column names the row field it displays and whether the grid may sort
/// by it. Header text, width and alignment are only used by renderers.
///
/// # Examples
///
/// ```
/// use staffgrid::grid::{Alignment, Column};
///
/// let columns = vec![
///     Column::new("id", "ID").width(6).align(Alignment::Right),
///     Column::new("email", "Email").width(28).unsortable(),
/// ];
/// assert!(columns[0].sortable);
/// assert!(!columns[1].sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Row field this column reads.
    pub property: String,
    /// Column header text
    pub header: String,
    /// Column width in terminal columns
    pub width: u16,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether this column is sortable
    pub sortable: bool,
}

impl Column {
    /// Create a sortable column for a row field.
    pub fn new(property: impl Into<String>, header: impl Into<String>) -> Self {
        let header = header.into();
        let width = (header.chars().count() as u16).max(8) + 2;
        Self {
            property: property.into(),
            header,
            width,
            align: Alignment::Left,
            sortable: true,
        }
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column non-sortable.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}
