//! Wire types for the AutoAttend REST contract.
//!
//! This crate contains the serde-serializable types exchanged with the
//! attendance backend. These types represent the "protocol layer" - the
//! shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization and a few display helpers
//! * 1:1 with the backend: field names follow the backend's camelCase JSON
//! * Stable: Changes only when the backend contract changes
//!
//! Session handling, authorization policy and view orchestration are built on
//! top of these types in `attend-rs`.

pub mod auth_exchange;
pub mod error_body;
pub mod image;
pub mod records;
pub mod requests;
pub mod resources;

pub use auth_exchange::*;
pub use error_body::*;
pub use image::*;
pub use records::*;
pub use requests::*;
pub use resources::*;
