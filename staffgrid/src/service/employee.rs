//! Employee service.

use tokio::sync::watch;

use crate::grid::{RowStream, watch_stream};
use crate::model::Employee;

/// Holds the employee list and publishes every change.
///
/// Subscribers always receive the current list first, then each
/// replacement.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    tx: watch::Sender<Vec<Employee>>,
}

impl EmployeeService {
    /// Creates a service seeded with the built-in roster.
    pub fn new() -> Self {
        Self::with_employees(seed_employees())
    }

    /// Creates a service with the given employees.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let (tx, _rx) = watch::channel(employees);
        Self { tx }
    }

    /// Stream of employee lists, starting with the current one.
    pub fn employees(&self) -> RowStream<Employee> {
        watch_stream(self.tx.subscribe())
    }

    /// The current list.
    pub fn snapshot(&self) -> Vec<Employee> {
        self.tx.borrow().clone()
    }

    /// Replaces the list, notifying every subscriber.
    pub fn replace(&self, employees: Vec<Employee>) {
        log::debug!("Publishing {} employees", employees.len());
        self.tx.send_replace(employees);
    }
}

impl Default for EmployeeService {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in roster.
pub fn seed_employees() -> Vec<Employee> {
    const ROSTER: [(&str, &str, &str, &str); 29] = [
        ("Alice", "Smith", "alice@example.com", "Engineering"),
        ("Bob", "Jones", "bob@example.com", "HR"),
        ("Carol", "Wilson", "carol@example.com", "Engineering"),
        ("David", "Brown", "david@example.com", "Marketing"),
        ("Eva", "Davis", "eva@example.com", "Engineering"),
        ("Frank", "Miller", "frank@example.com", "HR"),
        ("Grace", "Taylor", "grace@example.com", "Marketing"),
        ("Tom", "Anderson", "tom@example.com", "Sales"),
        ("Adam", "Johnson", "adam@example.com", "Finance"),
        ("Henry", "Anderson", "henry@example.com", "Finance"),
        ("Patricia", "Anderson", "patricia@example.com", "Finance"),
        ("Michael", "Wilson", "michael@example.com", "Engineering"),
        ("Linda", "Garcia", "linda@example.com", "Finance"),
        ("James", "Martinez", "james@example.com", "Engineering"),
        ("Emily", "Lopez", "emily@example.com", "Marketing"),
        ("Michael", "Garcia", "michael@example.com", "Sales"),
        ("Sophia", "Martinez", "sophia@example.com", "Engineering"),
        ("Daniel", "Hernandez", "daniel@example.com", "HR"),
        ("Olivia", "Lopez", "olivia@example.com", "Marketing"),
        ("Liam", "Smith", "liam@example.com", "Sales"),
        ("Ava", "Garcia", "ava@example.com", "Engineering"),
        ("William", "Martinez", "william@example.com", "Finance"),
        ("Isabella", "Hernandez", "isabella@example.com", "Marketing"),
        ("Ethan", "Lopez", "ethan@example.com", "Sales"),
        ("Mia", "Clark", "mia@example.com", "Engineering"),
        ("Fav", "Jen", "fav@example.com", "Support"),
        ("Noah", "Thompson", "noah@example.com", "Support"),
        ("Emma", "White", "emma@example.com", "Support"),
        ("Lucas", "Harris", "lucas@example.com", "Services"),
    ];

    ROSTER
        .iter()
        .zip(1..)
        .map(|(&(first, last, email, department), id)| {
            Employee::new(id, first, last, email, department)
        })
        .collect()
}
