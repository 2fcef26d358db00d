//! The HTTP client core: request construction, credential attachment, and
//! transparent token refresh.
//!
//! Every request goes through [`FableClient::send`], which attaches the
//! current access token as a bearer credential. A 401 response triggers the
//! recovery path: take the refresh lock, exchange the refresh token for a
//! new token pair, replace the session, and retry the request exactly once
//! with the fresh credential. This applies even when the failed request
//! carried no credential at all, so a session holding only a refresh token
//! can still recover. A request that fails with 401 after already retrying
//! with a refreshed credential gives up.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::ClientError;
use crate::session::{Session, SessionBackend, SessionStore};
use crate::types::{AuthEnvelope, AuthPayload};

const DEFAULT_USER_AGENT: &str = concat!("fable-client/", env!("CARGO_PKG_VERSION"));

struct Inner {
    http: Client,
    base_url: String,
    session: SessionStore,
    /// Serializes refresh exchanges so concurrent 401s trigger one refresh.
    refresh_lock: Mutex<()>,
}

/// Fable API client.
///
/// Cheap to clone; all clones share the same session and refresh lock.
#[derive(Clone)]
pub struct FableClient {
    inner: Arc<Inner>,
}

impl FableClient {
    /// Create a client with default configuration and an in-memory session.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder.
    pub fn builder() -> FableClientBuilder {
        FableClientBuilder::default()
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The shared session store (for subscribing to auth state changes).
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Build a request for the given path, attaching the bearer credential
    /// when a non-empty access token is present.
    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut request = self.inner.http.request(method, url);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        request
    }

    /// Send an authenticated request, recovering from a 401 by refreshing
    /// the token pair and retrying once.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let token = self.inner.session.access_token();

        let mut request = self.request(method.clone(), path, token.as_deref());
        if let Some(ref body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::decode(response).await;
        }

        // Attempt recovery even when the request carried no credential: the
        // store may still hold a refresh token worth exchanging.
        let stale_token = token.unwrap_or_default();
        let Some(fresh_token) = self.refreshed_token(&stale_token).await? else {
            return Err(ClientError::AuthenticationFailed(
                "Token refresh failed".into(),
            ));
        };

        // Retry exactly once with the fresh credential. A second 401 means
        // the refreshed token is also being rejected; retrying further
        // would loop, so give up here.
        let mut retry = self.request(method, path, Some(&fresh_token));
        if let Some(ref body) = body {
            retry = retry.json(body);
        }
        let response = retry.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthenticationFailed(message));
        }
        Self::decode(response).await
    }

    /// Obtain a usable access token after `stale_token` was rejected.
    ///
    /// Returns `None` when recovery is impossible: no refresh token stored,
    /// or the refresh exchange itself was rejected. A transport failure
    /// during the exchange is surfaced as an error instead, since the
    /// credentials may still be good.
    async fn refreshed_token(&self, stale_token: &str) -> Result<Option<String>, ClientError> {
        let _guard = self.inner.refresh_lock.lock().await;

        // Another task may have finished a refresh while we waited for the
        // lock; if the stored token already differs from the one that
        // failed, use it without another exchange.
        let current = self.inner.session.snapshot();
        if current.access_token != stale_token && !current.access_token.is_empty() {
            return Ok(Some(current.access_token));
        }

        // A blank refresh token cannot be exchanged; skip the network call.
        if current.refresh_token.is_empty() {
            return Ok(None);
        }

        tracing::debug!("Access token rejected, exchanging refresh token");
        let response = self
            .inner
            .http
            .post(format!("{}/api/v1/auth/refresh", self.inner.base_url))
            .query(&[("refreshToken", current.refresh_token.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Refresh token exchange rejected");
            return Ok(None);
        }

        let envelope: AuthEnvelope<AuthPayload> = response.json().await?;
        let payload = envelope.data;
        let token = payload.token.clone();

        self.inner.session.replace(Session {
            access_token: payload.token,
            refresh_token: payload.refresh_token,
            user_id: payload.user.id,
            username: payload.user.username,
            email: payload.user.email,
        })?;
        tracing::debug!("Session refreshed");

        Ok(Some(token))
    }

    /// Turn a non-401 response into a value or a status-mapped error.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Send a request and discard the response body (for 204 endpoints).
    pub(crate) async fn send_no_content(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ClientError> {
        let token = self.inner.session.access_token();

        let mut request = self.request(method.clone(), path, token.as_deref());
        if let Some(ref body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let stale_token = token.unwrap_or_default();
            let Some(fresh_token) = self.refreshed_token(&stale_token).await? else {
                return Err(ClientError::AuthenticationFailed(
                    "Token refresh failed".into(),
                ));
            };
            let mut retry = self.request(method, path, Some(&fresh_token));
            if let Some(ref body) = body {
                retry = retry.json(body);
            }
            let response = retry.send().await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                let message = response.text().await.unwrap_or_default();
                return Err(ClientError::AuthenticationFailed(message));
            }
            return Self::check_status(response).await;
        }
        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for [`FableClient`].
#[derive(Default)]
pub struct FableClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    backend: Option<Box<dyn SessionBackend>>,
}

impl FableClientBuilder {
    /// Set the base URL (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the session persistence backend. Defaults to in-memory.
    pub fn session_backend(mut self, backend: Box<dyn SessionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FableClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut http_builder = ClientBuilder::new()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.into()));
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http = http_builder.build()?;

        let session = match self.backend {
            Some(backend) => SessionStore::new(backend)?,
            None => SessionStore::in_memory(),
        };

        Ok(FableClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                session,
                refresh_lock: Mutex::new(()),
            }),
        })
    }
}
