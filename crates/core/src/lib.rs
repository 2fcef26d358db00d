//! Shared domain types for the Fable platform.
//!
//! Everything here is dependency-light so both the server crates and the
//! client crate can build on the same definitions.

pub mod error;
pub mod roles;
pub mod types;
pub mod validation;
