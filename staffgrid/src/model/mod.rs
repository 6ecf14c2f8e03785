//! Dashboard records.

mod department;
mod employee;

pub use department::Department;
pub use employee::Employee;
