//! HTTP/JSON protocol definitions for Rollcall.
//!
//! This crate defines the wire types exchanged between the Rollcall server
//! and its clients: shared value types, request and response bodies, and the
//! error envelope.

mod error;
pub mod requests;
pub mod responses;
mod types;

pub use error::*;
pub use types::*;
