//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract the service layer depends on.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository APIs report store failures unchanged; domain errors such as
//!   duplicate emails are decided by the service layer.

pub mod employee_repo;
