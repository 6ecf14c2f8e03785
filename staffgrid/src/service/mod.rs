//! In-memory data services feeding the dashboard.

mod department;
mod employee;

pub use department::{DEPARTMENT_CAPACITIES, DepartmentService, compute_departments, progress_color};
pub use employee::{EmployeeService, seed_employees};
