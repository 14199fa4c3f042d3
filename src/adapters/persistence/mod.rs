//! Persistence adapters. Implement BookingPort.

pub mod booking_json;

pub use booking_json::BookingJson;
