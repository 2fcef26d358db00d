//! Route definitions for the `/me` resource.
//!
//! All endpoints operate on the authenticated caller.

use axum::routing::get;
use axum::Router;

use crate::handlers::interaction;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /library -> list_library (?filter=following|wishlist)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/library", get(interaction::list_library))
}
