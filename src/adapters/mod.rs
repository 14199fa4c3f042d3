//! Infrastructure adapters. Implement outbound ports and the inbound UI.
//!
//! Reference catalogs, provider directory, booking store, terminal UI.
//! Map errors to DomainError.

pub mod catalog;
pub mod directory;
pub mod persistence;
pub mod ui;
