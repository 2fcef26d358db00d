//! Wiremock tests for credential attachment and transparent token refresh.

use assert_matches::assert_matches;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fable_client::{ClientError, FableClient, Session};

fn auth_body(token: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "token": token,
            "refreshToken": refresh,
            "expiresIn": 900,
            "user": { "id": 7, "username": "alice", "email": "a@x.com", "role": "reader" }
        }
    })
}

fn logged_in_client(server: &MockServer) -> FableClient {
    let client = FableClient::new(server.uri()).expect("client");
    client
        .session()
        .replace(Session {
            access_token: "at-1".into(),
            refresh_token: "rt-1".into(),
            user_id: 7,
            username: "alice".into(),
            email: "a@x.com".into(),
        })
        .expect("seed session");
    client
}

/// Requests carry the stored access token as a bearer credential.
#[tokio::test]
async fn attaches_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .and(header("authorization", "Bearer at-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let novels = client.novels(None).await.expect("request should succeed");
    assert!(novels.is_empty());
}

/// With no session, no Authorization header is sent at all.
#[tokio::test]
async fn logged_out_requests_carry_no_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let received = client.novels(None).await.expect("request should succeed");
    assert!(received.is_empty());

    let requests = server.received_requests().await.expect("requests");
    assert!(requests[0].headers.get("authorization").is_none());
}

/// A 401 triggers a refresh exchange (refresh token as query parameter),
/// the session is atomically replaced with all five fields, and the
/// original request succeeds on retry with the new token.
#[tokio::test]
async fn refreshes_and_retries_on_401() {
    let server = MockServer::start().await;

    // Old token is rejected, new one accepted.
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .and(header("authorization", "Bearer at-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .and(header("authorization", "Bearer at-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(query_param("refreshToken", "rt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("at-2", "rt-2")))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    client.novels(None).await.expect("request should succeed");

    let session = client.session().snapshot();
    assert_eq!(session.access_token, "at-2");
    assert_eq!(session.refresh_token, "rt-2");
    assert_eq!(session.user_id, 7);
    assert_eq!(session.username, "alice");
    assert_eq!(session.email, "a@x.com");
}

/// A blank refresh token cannot be exchanged; no refresh call is made and
/// the 401 surfaces as an authentication failure.
#[tokio::test]
async fn blank_refresh_token_skips_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("at-2", "rt-2")))
        .expect(0)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    client
        .session()
        .replace(Session {
            access_token: "at-1".into(),
            refresh_token: String::new(),
            user_id: 7,
            username: "alice".into(),
            email: "a@x.com".into(),
        })
        .expect("seed session");

    let result = client.novels(None).await;
    assert_matches!(result, Err(ClientError::AuthenticationFailed(_)));
}

/// When the refresh exchange itself is rejected, the caller gets an
/// authentication failure and the original request is not retried.
#[tokio::test]
async fn rejected_refresh_surfaces_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let result = client.novels(None).await;

    assert_matches!(result, Err(ClientError::AuthenticationFailed(_)));
    // The stored session is untouched; the user can try again later.
    assert_eq!(client.session().snapshot().refresh_token, "rt-1");
}

/// If the retried request is rejected again, the client gives up instead
/// of refreshing in a loop.
#[tokio::test]
async fn second_401_gives_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("at-2", "rt-2")))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let result = client.novels(None).await;

    assert_matches!(result, Err(ClientError::AuthenticationFailed(_)));
}

/// A request with no credential that gets a 401 recovers when the store
/// holds a refresh token: the exchange runs and the retry carries the
/// newly issued access token.
#[tokio::test]
async fn missing_access_token_still_refreshes() {
    let server = MockServer::start().await;
    // Mounted first so the credentialed retry matches here, not below.
    Mock::given(method("GET"))
        .and(path("/api/v1/me/library"))
        .and(header("authorization", "Bearer at-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me/library"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(query_param("refreshToken", "rt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("at-2", "rt-2")))
        .expect(1)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    client
        .session()
        .replace(Session {
            access_token: String::new(),
            refresh_token: "rt-1".into(),
            user_id: 7,
            username: "alice".into(),
            email: "a@x.com".into(),
        })
        .expect("seed session");

    let entries = client.library().await.expect("request should succeed");
    assert!(entries.is_empty());

    let session = client.session().snapshot();
    assert_eq!(session.access_token, "at-2");
    assert_eq!(session.refresh_token, "rt-2");

    // The first attempt went out bare; only the retry carried a credential.
    let requests = server.received_requests().await.expect("requests");
    assert!(requests[0].headers.get("authorization").is_none());
}

/// A 401 for a fully anonymous session (no refresh token either) is
/// surfaced directly; with nothing stored there is nothing to exchange.
#[tokio::test]
async fn anonymous_401_is_not_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me/library"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("at-2", "rt-2")))
        .expect(0)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let result = client.library().await;

    assert_matches!(result, Err(ClientError::AuthenticationFailed(_)));
}

/// Login stores the full session and notifies subscribers.
#[tokio::test]
async fn login_replaces_session_and_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("at-1", "rt-1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = FableClient::new(server.uri()).expect("client");
    let mut rx = client.session().subscribe();

    let user = client.login("alice", "pw").await.expect("login");
    assert_eq!(user.username, "alice");

    rx.changed().await.expect("changed");
    let session = rx.borrow().clone();
    assert_eq!(session.access_token, "at-1");
    assert_eq!(session.user_id, 7);
    assert_eq!(session.email, "a@x.com");
}

/// After a clear, every session field reads back empty and requests stop
/// carrying an Authorization header.
#[tokio::test]
async fn cleared_session_sends_no_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    client.session().clear().expect("clear");

    assert_eq!(client.session().snapshot(), Session::default());

    client.novels(None).await.expect("request should succeed");
    let requests = server.received_requests().await.expect("requests");
    assert!(requests[0].headers.get("authorization").is_none());
}

/// Logout clears the local session even when the server call fails.
#[tokio::test]
async fn logout_clears_session_on_server_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let result = client.logout().await;

    assert!(result.is_err());
    assert!(!client.session().snapshot().is_logged_in());
}
