//! Domain model for the employee record store.
//!
//! # Responsibility
//! - Define the data structures shared by repository and service layers.
//!
//! # Invariants
//! - Every persisted employee is identified by a positive `EmployeeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod employee;
