//! Employee use-case service.
//!
//! # Responsibility
//! - Enforce email uniqueness on create and existence on update.
//! - Delegate reads and deletes to the record store unchanged.
//!
//! # Invariants
//! - `save` is never reached when `create` or `update` reject their input.
//! - `update` performs no email-uniqueness check; collisions are left to the
//!   store's UNIQUE constraint and surface as `ServiceError::Repo`.
//! - The service holds no state besides its repository.

use crate::model::employee::{Employee, EmployeeId, UNSET_EMPLOYEE_ID};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Another employee already uses this email.
    AlreadyExists { email: String },
    /// No employee exists for this id.
    NotFound(EmployeeId),
    /// Persistence-layer failure, propagated without translation.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists { email } => {
                write!(f, "employee already exists with given email: {email}")
            }
            Self::NotFound(id) => write!(f, "employee does not exist with given id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Business-rule layer over an employee record store.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new employee unless its email is already taken.
    ///
    /// Any id carried by `employee` is ignored; the store assigns a fresh one.
    ///
    /// # Errors
    /// - `AlreadyExists` when `find_by_email` returns a row.
    /// - `Repo` for store failures, including a UNIQUE violation raised by a
    ///   concurrent insert of the same email.
    pub fn create(&self, employee: &Employee) -> ServiceResult<Employee> {
        if self.repo.find_by_email(&employee.email)?.is_some() {
            warn!("event=employee_create module=service status=error error_code=already_exists");
            return Err(ServiceError::AlreadyExists {
                email: employee.email.clone(),
            });
        }

        let mut fresh = employee.clone();
        fresh.id = UNSET_EMPLOYEE_ID;
        let saved = self.repo.save(&fresh)?;
        info!(
            "event=employee_create module=service status=ok employee_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Returns every employee; empty when the store is empty.
    pub fn get_all(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo.find_all()?)
    }

    pub fn get_by_id(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Replaces first name, last name and email of the employee `updated.id`.
    ///
    /// The persisted value carries `updated`'s id and fields exactly.
    ///
    /// # Errors
    /// - `NotFound` when no employee has `updated.id`, including a row
    ///   deleted between the lookup and the write.
    /// - `Repo` for store failures, including an email already used by
    ///   another employee.
    pub fn update(&self, updated: &Employee) -> ServiceResult<Employee> {
        let Some(mut existing) = self.repo.find_by_id(updated.id)? else {
            warn!(
                "event=employee_update module=service status=error error_code=not_found employee_id={}",
                updated.id
            );
            return Err(ServiceError::NotFound(updated.id));
        };

        existing.overwrite_fields_from(updated);
        let saved = match self.repo.save(&existing) {
            Ok(saved) => saved,
            Err(RepoError::NotFound(id)) => return Err(ServiceError::NotFound(id)),
            Err(err) => return Err(err.into()),
        };
        info!(
            "event=employee_update module=service status=ok employee_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Deletes the employee if present; missing ids are not an error.
    pub fn delete(&self, id: EmployeeId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=employee_delete module=service status=ok employee_id={id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::db::DbError;
    use crate::repo::employee_repo::RepoError;
    use std::error::Error;

    #[test]
    fn repo_not_found_is_not_translated_into_domain_error() {
        let err = ServiceError::from(RepoError::NotFound(42));
        assert!(matches!(err, ServiceError::Repo(RepoError::NotFound(42))));
    }

    #[test]
    fn other_repo_errors_pass_through_with_source() {
        let err = ServiceError::from(RepoError::Db(DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        }));
        assert!(matches!(err, ServiceError::Repo(RepoError::Db(_))));
        assert!(err.source().is_some());
    }

    #[test]
    fn messages_carry_offending_values() {
        let exists = ServiceError::AlreadyExists {
            email: "adarsh@gmail.com".to_string(),
        };
        assert!(exists.to_string().contains("adarsh@gmail.com"));
        assert!(ServiceError::NotFound(7).to_string().contains('7'));
    }
}
