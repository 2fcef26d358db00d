//! Route definitions for the `/novels` resource and its nested collections.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{chapter, comment, interaction, novel, review};
use crate::state::AppState;

/// Routes mounted at `/novels`.
///
/// ```text
/// GET    /                    -> list_novels (drafts visible to admins only)
/// POST   /                    -> create_novel (admin)
/// GET    /{id}                -> get_novel
/// PUT    /{id}                -> update_novel (admin)
/// DELETE /{id}                -> delete_novel (admin)
///
/// GET    /{id}/chapters       -> list_chapters
/// POST   /{id}/chapters       -> create_chapter (admin)
///
/// GET    /{id}/comments       -> list_comments (?chapter_id= filter)
/// POST   /{id}/comments       -> create_comment (auth)
///
/// GET    /{id}/reviews        -> list_reviews
/// PUT    /{id}/review         -> upsert_review (auth)
/// DELETE /{id}/review         -> delete_review (auth)
///
/// GET    /{id}/interaction    -> get_interaction (auth)
/// PUT    /{id}/interaction    -> update_interaction (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(novel::list_novels).post(novel::create_novel))
        .route(
            "/{id}",
            get(novel::get_novel)
                .put(novel::update_novel)
                .delete(novel::delete_novel),
        )
        .route(
            "/{id}/chapters",
            get(chapter::list_chapters).post(chapter::create_chapter),
        )
        .route(
            "/{id}/comments",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route("/{id}/reviews", get(review::list_reviews))
        .route(
            "/{id}/review",
            put(review::upsert_review).delete(review::delete_review),
        )
        .route(
            "/{id}/interaction",
            get(interaction::get_interaction).put(interaction::update_interaction),
        )
}
