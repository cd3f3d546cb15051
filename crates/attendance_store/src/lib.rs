//! User, room and attendance storage for Rollcall.
//!
//! This crate provides the storage abstraction the server talks to, an
//! in-memory implementation of it, and the pure functions that turn
//! attendance records into percentages and per-day sessions.

mod error;
mod memory;
pub mod summary;
mod traits;

pub use error::*;
pub use memory::*;
pub use traits::*;
