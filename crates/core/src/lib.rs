//! Shared domain types for the ecoloop platform.
//!
//! This crate is free of I/O: it holds the error taxonomy, id/timestamp
//! aliases, and the waste-category arithmetic used by the claim workflow.

pub mod error;
pub mod types;
pub mod waste;
