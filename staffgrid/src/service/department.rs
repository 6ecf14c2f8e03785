//! Department capacity service.

use std::collections::HashMap;

use futures::StreamExt;

use super::EmployeeService;
use crate::grid::RowStream;
use crate::model::{Department, Employee};

/// Department capacities, in display order.
pub const DEPARTMENT_CAPACITIES: [(&str, u32); 7] = [
    ("Engineering", 10),
    ("HR", 5),
    ("Marketing", 7),
    ("Sales", 4),
    ("Finance", 6),
    ("Support", 4),
    ("Services", 4),
];

/// Derives per-department capacity stats from the employee list.
#[derive(Debug, Clone)]
pub struct DepartmentService {
    employees: EmployeeService,
}

impl DepartmentService {
    pub fn new(employees: EmployeeService) -> Self {
        Self { employees }
    }

    /// Stream of department stats, recomputed on every employee change.
    pub fn departments(&self) -> RowStream<Department> {
        self.employees
            .employees()
            .map(|employees| compute_departments(&employees))
            .boxed()
    }

    /// Stats for the current employee list.
    pub fn snapshot(&self) -> Vec<Department> {
        compute_departments(&self.employees.snapshot())
    }
}

/// Counts employees per department and derives vacancy.
///
/// Only the departments in [`DEPARTMENT_CAPACITIES`] are reported, in that
/// order. Employees of unknown departments are ignored.
pub fn compute_departments(employees: &[Employee]) -> Vec<Department> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for employee in employees {
        *counts.entry(employee.department.as_str()).or_default() += 1;
    }

    DEPARTMENT_CAPACITIES
        .iter()
        .map(|&(name, capacity)| {
            let count = counts.get(name).copied().unwrap_or(0);
            Department::from_count(name, count, capacity)
        })
        .collect()
}

/// Gauge color for a percentage.
pub fn progress_color(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "#28a745"
    } else if percentage >= 70.0 {
        "#ffc107"
    } else if percentage >= 50.0 {
        "#fd7e14"
    } else {
        "#dc3545"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::seed_employees;

    #[test]
    fn test_seed_department_stats() {
        let departments = compute_departments(&seed_employees());
        let summary: Vec<(&str, u32, u32)> = departments
            .iter()
            .map(|d| (d.name.as_str(), d.current_employees, d.vacancy_percentage))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Engineering", 8, 20),
                ("HR", 3, 40),
                ("Marketing", 5, 28),
                ("Sales", 4, 0),
                ("Finance", 5, 16),
                ("Support", 3, 25),
                ("Services", 1, 75),
            ]
        );
    }

    #[test]
    fn test_unknown_departments_ignored() {
        let employees = vec![Employee::new(1, "A", "B", "a@example.com", "Legal")];
        let departments = compute_departments(&employees);
        assert_eq!(departments.len(), DEPARTMENT_CAPACITIES.len());
        assert!(departments.iter().all(|d| d.current_employees == 0));
    }

    #[test]
    fn test_progress_color_thresholds() {
        assert_eq!(progress_color(95.0), "#28a745");
        assert_eq!(progress_color(90.0), "#28a745");
        assert_eq!(progress_color(70.0), "#ffc107");
        assert_eq!(progress_color(50.0), "#fd7e14");
        assert_eq!(progress_color(49.9), "#dc3545");
    }

    #[tokio::test]
    async fn test_departments_follow_employee_changes() {
        let employees = EmployeeService::with_employees(Vec::new());
        let service = DepartmentService::new(employees.clone());
        let mut stream = service.departments();

        let first = stream.next().await.unwrap();
        assert!(first.iter().all(|d| d.current_employees == 0));

        employees.replace(vec![Employee::new(1, "A", "B", "a@example.com", "HR")]);
        let second = stream.next().await.unwrap();
        assert_eq!(second[1].name, "HR");
        assert_eq!(second[1].current_employees, 1);
        assert_eq!(second[1].vacancy_percentage, 80);
    }
}
