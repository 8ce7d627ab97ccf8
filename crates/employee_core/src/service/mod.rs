//! Core use-case services.
//!
//! # Responsibility
//! - Enforce business invariants on top of repository contracts.
//! - Keep transport layers decoupled from storage details.

pub mod employee_service;
