//! Department capacity record.

use serde::Deserialize;
use serde::Serialize;

use crate::value::GridRow;
use crate::value::Value;

/// Head count and capacity of one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub name: String,
    pub current_employees: u32,
    pub max_capacity: u32,
    /// Share of capacity still open, in whole percent (never negative).
    pub vacancy_percentage: u32,
}

impl Department {
    /// Builds the stats for a department from its head count.
    ///
    /// Vacancy is `floor((max - count) / max * 100)`, clamped at 0, and 0
    /// when the department has no capacity.
    pub fn from_count(name: impl Into<String>, current_employees: u32, max_capacity: u32) -> Self {
        let vacancy_percentage = if max_capacity == 0 {
            0
        } else {
            let open = max_capacity as i64 - current_employees as i64;
            (open * 100).div_euclid(max_capacity as i64).max(0) as u32
        };
        Self {
            name: name.into(),
            current_employees,
            max_capacity,
            vacancy_percentage,
        }
    }

    /// Share of capacity in use, in whole percent, capped at 100.
    pub fn occupancy_percentage(&self) -> u32 {
        100 - self.vacancy_percentage.min(100)
    }
}

impl GridRow for Department {
    fn field(&self, name: &str) -> Value {
        match name {
            "name" => self.name.as_str().into(),
            "currentEmployees" => self.current_employees.into(),
            "maxCapacity" => self.max_capacity.into(),
            "vacancyPercentage" => self.vacancy_percentage.into(),
            _ => Value::Null,
        }
    }
}
