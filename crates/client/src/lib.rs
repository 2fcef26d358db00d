//! Fable API client.
//!
//! A reqwest-based client for the Fable reading platform with transparent
//! token refresh: every request carries the current access token, and a 401
//! triggers a single refresh-and-retry before the error surfaces to the
//! caller. The session (token pair plus user identity) is persisted through
//! a pluggable backend and observable through a watch channel, so UI layers
//! can react to login, refresh, and logout without polling.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use catalog::CatalogCache;
pub use client::{FableClient, FableClientBuilder};
pub use error::ClientError;
pub use session::{FileBackend, MemoryBackend, Session, SessionBackend, SessionStore};
pub use types::Resource;
