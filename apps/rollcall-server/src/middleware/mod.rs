//! Request middleware.

mod auth;
mod latency;

pub use self::auth::*;
pub use self::latency::*;
