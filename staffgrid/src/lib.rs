//! Employee dashboard building blocks.
//!
//! A generic sortable/paginated data grid, a circular progress indicator
//! model, and the in-memory employee and department services that feed them.

pub mod grid;
pub mod model;
pub mod progress;
pub mod service;
pub mod timer;

mod value;

pub use grid::DataGrid;
pub use value::{GridRow, Row, Value};
