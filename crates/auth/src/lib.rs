//! Authentication for Rollcall.
//!
//! This crate provides:
//! - Argon2 password hashing
//! - JWT access tokens carrying the user's role
//! - A revocation list so logged-out tokens stop working

mod error;
mod jwt;
mod password;
mod revocation;

pub use error::*;
pub use jwt::*;
pub use password::*;
pub use revocation::*;

/// Default JWT expiration time in hours.
pub const DEFAULT_JWT_EXPIRATION_HOURS: u64 = 24;

/// Default JWT issuer.
pub const DEFAULT_JWT_ISSUER: &str = "rollcall";
