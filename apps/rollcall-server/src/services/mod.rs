//! Startup services.

pub mod demo_seed;
