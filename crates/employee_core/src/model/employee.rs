//! Employee domain model.
//!
//! # Responsibility
//! - Define the single record managed by the core.
//! - Provide the field-overwrite helper used by full-replacement updates.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - `id == UNSET_EMPLOYEE_ID` marks a value that was never persisted.
//! - `email` is unique across all persisted employees.

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate identifier.
pub type EmployeeId = i64;

/// Id carried by an employee that has not been persisted yet.
pub const UNSET_EMPLOYEE_ID: EmployeeId = 0;

/// Canonical employee record.
///
/// Serialized with camelCase keys so transport layers can expose it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Missing in incoming payloads for new employees.
    #[serde(default)]
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Compared byte-for-byte by the store (no case folding, no trimming).
    pub email: String,
}

impl Employee {
    /// Creates an employee that has not been persisted yet.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::with_id(UNSET_EMPLOYEE_ID, first_name, last_name, email)
    }

    /// Creates an employee with a caller-provided id.
    ///
    /// Used for updates, where the id addresses an existing row.
    pub fn with_id(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Returns whether this value addresses a stored row, i.e. its id is set.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSET_EMPLOYEE_ID
    }

    /// Copies every mutable field from `source`, keeping this record's id.
    pub fn overwrite_fields_from(&mut self, source: &Employee) {
        self.first_name.clone_from(&source.first_name);
        self.last_name.clone_from(&source.last_name);
        self.email.clone_from(&source.email);
    }
}

#[cfg(test)]
mod tests {
    use super::{Employee, UNSET_EMPLOYEE_ID};

    #[test]
    fn new_employee_is_not_persisted() {
        let employee = Employee::new("Adarsh", "Kumar", "adarsh@gmail.com");
        assert_eq!(employee.id, UNSET_EMPLOYEE_ID);
        assert!(!employee.is_persisted());
        assert!(Employee::with_id(7, "a", "b", "c").is_persisted());
        assert!(Employee::with_id(-3, "a", "b", "c").is_persisted());
    }

    #[test]
    fn overwrite_fields_keeps_identity() {
        let mut existing = Employee::with_id(3, "Adarsh", "Kumar", "adarsh@gmail.com");
        let incoming = Employee::with_id(99, "Anand", "K", "anand@gmail.com");

        existing.overwrite_fields_from(&incoming);

        assert_eq!(existing.id, 3);
        assert_eq!(existing.first_name, "Anand");
        assert_eq!(existing.last_name, "K");
        assert_eq!(existing.email, "anand@gmail.com");
    }

    #[test]
    fn json_shape_uses_camel_case_and_defaults_id() {
        let employee = Employee::with_id(1, "Adarsh", "Kumar", "adarsh@gmail.com");
        let json = serde_json::to_value(&employee).expect("employee should serialize");
        assert_eq!(json["firstName"], "Adarsh");
        assert_eq!(json["lastName"], "Kumar");
        assert_eq!(json["email"], "adarsh@gmail.com");
        assert_eq!(json["id"], 1);

        let parsed: Employee = serde_json::from_str(
            r#"{"firstName":"Anand","lastName":"K","email":"anand@gmail.com"}"#,
        )
        .expect("payload without id should parse");
        assert_eq!(parsed, Employee::new("Anand", "K", "anand@gmail.com"));
    }
}
