//! Infrastructure adapters. Implement ports.
//!
//! SQLite / in-memory storage, file exports, terminal UI. Map errors to DomainError.

pub mod export;
pub mod persistence;
pub mod ui;
