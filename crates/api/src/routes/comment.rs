//! Route definitions for the `/comments` resource.
//!
//! Comment creation and listing live under `/novels/{id}/comments`; this
//! module covers deletion by comment id.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id} -> delete_comment (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comment::delete_comment))
}
