//! Employee record.

use serde::Deserialize;
use serde::Serialize;

use crate::value::GridRow;
use crate::value::Value;

/// An employee as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl Employee {
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl GridRow for Employee {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "firstName" => self.first_name.as_str().into(),
            "lastName" => self.last_name.as_str().into(),
            "email" => self.email.as_str().into(),
            "department" => self.department.as_str().into(),
            _ => Value::Null,
        }
    }
}
