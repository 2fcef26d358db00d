//! Authentication methods: login, register, logout.

use reqwest::Method;

use crate::client::FableClient;
use crate::error::ClientError;
use crate::session::Session;
use crate::types::{AuthEnvelope, AuthPayload, UserInfo};

impl FableClient {
    /// Log in with username and password.
    ///
    /// On success the session store is replaced with the new token pair and
    /// user identity, and subscribers are notified.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserInfo, ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let envelope: AuthEnvelope<AuthPayload> = self
            .send(Method::POST, "/api/v1/auth/login", Some(body))
            .await?;
        self.store_payload(envelope.data)
    }

    /// Register a reader account; the new account is logged in immediately.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, ClientError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let envelope: AuthEnvelope<AuthPayload> = self
            .send(Method::POST, "/api/v1/auth/register", Some(body))
            .await?;
        self.store_payload(envelope.data)
    }

    /// Log out: revoke the server-side sessions and clear the local one.
    ///
    /// The local session is cleared even when the server call fails, so a
    /// dead backend cannot trap the user in a logged-in state.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .send_no_content(Method::POST, "/api/v1/auth/logout", None)
            .await;
        self.session().clear()?;
        result
    }

    fn store_payload(&self, payload: AuthPayload) -> Result<UserInfo, ClientError> {
        let user = payload.user.clone();
        self.session().replace(Session {
            access_token: payload.token,
            refresh_token: payload.refresh_token,
            user_id: payload.user.id,
            username: payload.user.username,
            email: payload.user.email,
        })?;
        Ok(user)
    }
}
