//! Core entity definitions for Rollcall.
//!
//! This crate defines the data types shared by the store, the auth layer and
//! the server: users, rooms, attendance records and the subject catalog.

mod attendance;
mod room;
mod subject;
mod user;

pub use attendance::*;
pub use room::*;
pub use subject::*;
pub use user::*;
