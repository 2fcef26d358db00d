//! HTTP-level integration tests for the `/notifications` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth};
use sqlx::PgPool;

use fable_api::auth::password::hash_password;
use fable_db::models::user::CreateUser;
use fable_db::repositories::{NotificationRepo, UserRepo};

async fn reader_with_token(pool: &PgPool, username: &str) -> (i64, String) {
    let password = "correct horse battery";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        role: "reader".to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    (user.id, json["data"]["token"].as_str().unwrap().to_string())
}

/// Notifications require auth and list newest first, with an unread filter.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_notifications(pool: PgPool) {
    let (user_id, token) = reader_with_token(&pool, "notified").await;

    let first = NotificationRepo::create(
        &pool,
        user_id,
        "chapter_released",
        "New chapter",
        "Chapter 2 of Iron Crown is out.",
    )
    .await
    .expect("insert should succeed");
    NotificationRepo::create(&pool, user_id, "system", "Welcome", "Enjoy reading.")
        .await
        .expect("insert should succeed");

    NotificationRepo::mark_read(&pool, first, user_id)
        .await
        .expect("mark read should succeed");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications?unread_only=true", &token).await;
    let json = body_json(response).await;
    let unread = json["data"].as_array().unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0]["kind"], "system");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Marking a single notification read flips the unread counter; another
/// user's notification is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_read_and_unread_count(pool: PgPool) {
    let (user_id, token) = reader_with_token(&pool, "alice").await;
    let (other_id, _) = reader_with_token(&pool, "bob").await;

    let own = NotificationRepo::create(&pool, user_id, "system", "Hi", "One for alice.")
        .await
        .expect("insert should succeed");
    let foreign = NotificationRepo::create(&pool, other_id, "system", "Hi", "One for bob.")
        .await
        .expect("insert should succeed");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread"], 1);

    // Someone else's notification cannot be marked.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/notifications/{foreign}/read"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/notifications/{own}/read"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread"], 0);
}

/// `read-all` marks everything and reports how many rows changed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_all_read(pool: PgPool) {
    let (user_id, token) = reader_with_token(&pool, "busy").await;

    for i in 0..3 {
        NotificationRepo::create(&pool, user_id, "system", "Ping", &format!("Message {i}."))
            .await
            .expect("insert should succeed");
    }

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/notifications/read-all",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 3);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread"], 0);
}
