//! Shared response envelope types for API handlers.
//!
//! Resource endpoints use the `{ "data": ... }` envelope. Auth endpoints use
//! the `{ "success": ..., "data": ... }` envelope with camelCase payloads --
//! that shape is the wire contract the reading and admin clients parse, so it
//! is kept distinct from the resource envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope for resource endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Auth envelope: `{ "success": bool, "data": T }`.
#[derive(Debug, Serialize)]
pub struct AuthEnvelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> AuthEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
