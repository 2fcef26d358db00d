//! HTTP-level integration tests for the auth and admin endpoints.
//!
//! Tests cover registration, login, the query-parameter refresh contract,
//! token rotation, logout, RBAC enforcement, and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth};
use sqlx::PgPool;

use fable_api::auth::password::hash_password;
use fable_db::models::user::CreateUser;
use fable_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the user row plus
/// the plaintext password used.
async fn create_test_user(
    pool: &PgPool,
    username: &str,
    role: &str,
) -> (fable_db::models::user::User, String) {
    let password = "correct horse battery";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in a user via the API and return the `data` object of the auth
/// envelope (`token`, `refreshToken`, `expiresIn`, `user`).
async fn login_user(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    json["data"].clone()
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration creates a reader account and returns a full auth payload.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "newreader",
        "email": "newreader@test.com",
        "password": "a long enough password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].is_string());
    assert!(json["data"]["refreshToken"].is_string());
    assert_eq!(json["data"]["user"]["username"], "newreader");
    assert_eq!(json["data"]["user"]["role"], "reader");
}

/// Registering a duplicate username returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    create_test_user(&pool, "taken", "reader").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "taken",
        "email": "other@test.com",
        "password": "a long enough password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A short password is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "weakpw",
        "email": "weakpw@test.com",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns the camelCase auth envelope with token,
/// refreshToken, expiresIn, and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "loginuser", "reader").await;
    let app = common::build_test_app(pool);

    let data = login_user(app, "loginuser", &password).await;

    assert!(data["token"].is_string());
    assert!(data["refreshToken"].is_string());
    assert!(data["expiresIn"].is_number());
    assert_eq!(data["user"]["id"], user.id);
    assert_eq!(data["user"]["username"], "loginuser");
    assert_eq!(data["user"]["email"], "loginuser@test.com");
    assert_eq!(data["user"]["role"], "reader");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_test_user(&pool, "wrongpw", "reader").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "inactive", "reader").await;
    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "inactive", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Five consecutive failures lock the account; the correct password is then
/// refused until the lock expires.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_lockout(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "locked", "reader").await;

    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "username": "locked", "password": "nope nope nope" });
        let response = post_json(app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "locked", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

/// A valid refresh token, passed as the `refreshToken` query parameter,
/// yields a fresh token pair and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "refresher", "reader").await;

    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "refresher", &password).await;
    let refresh_token = login["refreshToken"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/auth/refresh?refreshToken={refresh_token}");
    let response = post_json(app, &uri, serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].is_string());
    assert!(json["data"]["refreshToken"].is_string());
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert_eq!(json["data"]["user"]["username"], "refresher");
    // Token rotation: the new refresh token must differ from the original.
    assert_ne!(json["data"]["refreshToken"].as_str().unwrap(), refresh_token);
}

/// A rotated-out (already used) refresh token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_token_single_use(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "reuser", "reader").await;

    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "reuser", &password).await;
    let refresh_token = login["refreshToken"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/auth/refresh?refreshToken={refresh_token}");

    let app = common::build_test_app(pool.clone());
    let first = post_json(app, &uri, serde_json::json!({})).await;
    assert_eq!(first.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let second = post_json(app, &uri, serde_json::json!({})).await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/refresh?refreshToken=not-a-real-token",
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout and RBAC
// ---------------------------------------------------------------------------

/// Logout revokes sessions (the refresh token stops working) and returns 204.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "logoutuser", "reader").await;

    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "logoutuser", &password).await;
    let access_token = login["token"].as_str().unwrap();
    let refresh_token = login["refreshToken"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/auth/logout", serde_json::json!({}), access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/auth/refresh?refreshToken={refresh_token}");
    let response = post_json(app, &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Admin endpoints require authentication; a missing token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_endpoint_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A reader is forbidden from admin endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_endpoint_requires_admin_role(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "plainreader", "reader").await;

    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "plainreader", &password).await;
    let token = login["token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An admin can list users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_list_users(pool: PgPool) {
    let (_admin, password) = create_test_user(&pool, "adminmgr", "admin").await;
    create_test_user(&pool, "someone", "reader").await;

    let app = common::build_test_app(pool.clone());
    let login = login_user(app, "adminmgr", &password).await;
    let token = login["token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}
