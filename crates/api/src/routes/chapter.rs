//! Route definitions for the `/chapters` resource.
//!
//! Chapter creation and listing live under `/novels/{id}/chapters`; this
//! module covers direct access by chapter id.

use axum::routing::get;
use axum::Router;

use crate::handlers::chapter;
use crate::state::AppState;

/// Routes mounted at `/chapters`.
///
/// ```text
/// GET    /{id} -> get_chapter
/// PUT    /{id} -> update_chapter (admin)
/// DELETE /{id} -> delete_chapter (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(chapter::get_chapter)
            .put(chapter::update_chapter)
            .delete(chapter::delete_chapter),
    )
}
