//! Route definitions for the `/images` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// POST   /     -> upload_image (auth, multipart)
/// GET    /{id} -> get_image (raw bytes)
/// DELETE /{id} -> delete_image (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(image::upload_image))
        .route("/{id}", get(image::get_image).delete(image::delete_image))
}
