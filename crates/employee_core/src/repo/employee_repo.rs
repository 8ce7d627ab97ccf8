//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the record-store operations consumed by `EmployeeService`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` inserts when the id is unset and updates in place otherwise.
//! - `delete_by_id` is a no-op for ids that do not exist.
//! - Store failures (including UNIQUE violations) surface as `RepoError::Db`
//!   without translation.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId};
use rusqlite::{named_params, params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEES_TABLE: &str = "employees";
const EMPLOYEE_COLUMNS: [&str; 4] = ["id", "first_name", "last_name", "email"];

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error, passed through untouched.
    Db(DbError),
    /// `save` was asked to update an id that has no row.
    NotFound(EmployeeId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be mapped to a valid `Employee`.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether the store rejected a write because of a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_unique_violation())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "employee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "employee repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Parameter binding convention for the full-name lookup.
///
/// Both conventions run the same query and return the same rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameBinding {
    /// `?1`, `?2` placeholders.
    #[default]
    Positional,
    /// `:first_name`, `:last_name` placeholders.
    Named,
}

/// Record-store contract for employees.
pub trait EmployeeRepository {
    /// Inserts (unset id) or updates in place (set id), returning the stored value.
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    /// Returns every employee ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;
    /// Returns every employee with exactly this first and last name, ordered by id.
    fn find_by_full_name(&self, first_name: &str, last_name: &str) -> RepoResult<Vec<Employee>>;
    /// Removes the employee if present.
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()>;
}

impl<R: EmployeeRepository + ?Sized> EmployeeRepository for &R {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        (**self).save(employee)
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        (**self).find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        (**self).find_by_email(email)
    }

    fn find_by_full_name(&self, first_name: &str, last_name: &str) -> RepoResult<Vec<Employee>> {
        (**self).find_by_full_name(first_name, last_name)
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Connections opened through `db::open_db*` always pass this check.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Full-name lookup with an explicit placeholder convention.
    pub fn find_by_full_name_bound(
        &self,
        first_name: &str,
        last_name: &str,
        binding: NameBinding,
    ) -> RepoResult<Vec<Employee>> {
        match binding {
            NameBinding::Positional => self.query_employees(
                &format!(
                    "{EMPLOYEE_SELECT_SQL}
                     WHERE first_name = ?1 AND last_name = ?2
                     ORDER BY id ASC;"
                ),
                params![first_name, last_name],
            ),
            NameBinding::Named => self.query_employees(
                &format!(
                    "{EMPLOYEE_SELECT_SQL}
                     WHERE first_name = :first_name AND last_name = :last_name
                     ORDER BY id ASC;"
                ),
                named_params! {
                    ":first_name": first_name,
                    ":last_name": last_name,
                },
            ),
        }
    }

    fn query_employees<P: Params>(&self, sql: &str, bind: P) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn query_one<P: Params>(&self, sql: &str, bind: P) -> RepoResult<Option<Employee>> {
        Ok(self.query_employees(sql, bind)?.into_iter().next())
    }

    fn insert(&self, employee: &Employee) -> RepoResult<Employee> {
        self.conn.execute(
            "INSERT INTO employees (first_name, last_name, email)
             VALUES (?1, ?2, ?3);",
            params![
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
            ],
        )?;

        let mut stored = employee.clone();
        stored.id = self.conn.last_insert_rowid();
        Ok(stored)
    }

    fn update(&self, employee: &Employee) -> RepoResult<Employee> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3
             WHERE id = ?4;",
            params![
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
                employee.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(employee.id));
        }

        Ok(employee.clone())
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        if employee.is_persisted() {
            self.update(employee)
        } else {
            self.insert(employee)
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.query_one(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"), [id])
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        self.query_one(&format!("{EMPLOYEE_SELECT_SQL} WHERE email = ?1;"), [email])
    }

    fn find_by_full_name(&self, first_name: &str, last_name: &str) -> RepoResult<Vec<Employee>> {
        self.find_by_full_name_bound(first_name, last_name, NameBinding::Positional)
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        self.conn.execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in employees.id"
        )));
    }

    Ok(Employee {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, EMPLOYEES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(EMPLOYEES_TABLE));
    }

    let present = table_columns(conn, EMPLOYEES_TABLE)?;
    if let Some(column) = EMPLOYEE_COLUMNS
        .into_iter()
        .find(|column| !present.iter().any(|name| name.as_str() == *column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: EMPLOYEES_TABLE,
            column,
        });
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
