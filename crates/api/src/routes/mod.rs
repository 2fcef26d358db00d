pub mod admin;
pub mod auth;
pub mod chapter;
pub mod comment;
pub mod health;
pub mod image;
pub mod me;
pub mod notification;
pub mod novel;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public, ?refreshToken=)
/// /auth/logout                          logout (requires auth)
///
/// /novels                               list (public), create (admin)
/// /novels/{id}                          get, update (admin), delete (admin)
/// /novels/{id}/chapters                 list, create (admin)
/// /novels/{id}/comments                 list, create (auth)
/// /novels/{id}/reviews                  list
/// /novels/{id}/review                   upsert, delete (auth)
/// /novels/{id}/interaction              get, upsert (auth)
/// /chapters/{id}                        get, update (admin), delete (admin)
/// /comments/{id}                        delete (owner or admin)
///
/// /me/library                           the caller's library (auth)
///
/// /notifications                        list (auth)
/// /notifications/read-all               mark all read
/// /notifications/unread-count           unread counter
/// /notifications/{id}/read              mark one read
///
/// /images                               upload (auth)
/// /images/{id}                          raw bytes (public)
///
/// /admin/users                          list, create (admin only)
/// /admin/users/{id}                     get, update, deactivate
/// /admin/users/{id}/reset-password      reset password
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/novels", novel::router())
        .nest("/chapters", chapter::router())
        .nest("/comments", comment::router())
        .nest("/me", me::router())
        .nest("/notifications", notification::router())
        .nest("/images", image::router())
        .nest("/admin", admin::router())
}
