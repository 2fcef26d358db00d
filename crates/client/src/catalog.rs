//! Catalog and reading methods, plus a small TTL cache for the novel
//! listing that the browse screen polls.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::Method;
use tokio::sync::watch;

use crate::client::FableClient;
use crate::error::ClientError;
use crate::types::{
    Chapter, ChapterSummary, Comment, DataEnvelope, LibraryEntry, Notification, Novel,
    NovelInteraction, NovelSummary, Resource, Review,
};

impl FableClient {
    /// List published novels, optionally filtered by a search term.
    pub async fn novels(&self, query: Option<&str>) -> Result<Vec<NovelSummary>, ClientError> {
        let path = match query {
            Some(q) => format!("/api/v1/novels?q={}", urlencode(q)),
            None => "/api/v1/novels".to_string(),
        };
        let envelope: DataEnvelope<Vec<NovelSummary>> =
            self.send(Method::GET, &path, None).await?;
        Ok(envelope.data)
    }

    /// Fetch a novel's detail.
    pub async fn novel(&self, id: i64) -> Result<Novel, ClientError> {
        let envelope: DataEnvelope<Novel> = self
            .send(Method::GET, &format!("/api/v1/novels/{id}"), None)
            .await?;
        Ok(envelope.data)
    }

    /// List a novel's chapters in reading order.
    pub async fn chapters(&self, novel_id: i64) -> Result<Vec<ChapterSummary>, ClientError> {
        let envelope: DataEnvelope<Vec<ChapterSummary>> = self
            .send(Method::GET, &format!("/api/v1/novels/{novel_id}/chapters"), None)
            .await?;
        Ok(envelope.data)
    }

    /// Fetch a full chapter for the reading screen.
    pub async fn chapter(&self, id: i64) -> Result<Chapter, ClientError> {
        let envelope: DataEnvelope<Chapter> = self
            .send(Method::GET, &format!("/api/v1/chapters/{id}"), None)
            .await?;
        Ok(envelope.data)
    }

    /// List a novel's comments.
    pub async fn comments(&self, novel_id: i64) -> Result<Vec<Comment>, ClientError> {
        let envelope: DataEnvelope<Vec<Comment>> = self
            .send(Method::GET, &format!("/api/v1/novels/{novel_id}/comments"), None)
            .await?;
        Ok(envelope.data)
    }

    /// Post a comment on a novel or one of its chapters.
    pub async fn post_comment(
        &self,
        novel_id: i64,
        chapter_id: Option<i64>,
        body: &str,
    ) -> Result<Comment, ClientError> {
        let payload = serde_json::json!({ "body": body, "chapter_id": chapter_id });
        let envelope: DataEnvelope<Comment> = self
            .send(
                Method::POST,
                &format!("/api/v1/novels/{novel_id}/comments"),
                Some(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// List a novel's reviews.
    pub async fn reviews(&self, novel_id: i64) -> Result<Vec<Review>, ClientError> {
        let envelope: DataEnvelope<Vec<Review>> = self
            .send(Method::GET, &format!("/api/v1/novels/{novel_id}/reviews"), None)
            .await?;
        Ok(envelope.data)
    }

    /// Create or replace the caller's review of a novel.
    pub async fn upsert_review(
        &self,
        novel_id: i64,
        rating: i32,
        body: Option<&str>,
    ) -> Result<Review, ClientError> {
        let payload = serde_json::json!({ "rating": rating, "body": body });
        let envelope: DataEnvelope<Review> = self
            .send(
                Method::PUT,
                &format!("/api/v1/novels/{novel_id}/review"),
                Some(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// The caller's interaction record for a novel.
    pub async fn interaction(&self, novel_id: i64) -> Result<NovelInteraction, ClientError> {
        let envelope: DataEnvelope<NovelInteraction> = self
            .send(
                Method::GET,
                &format!("/api/v1/novels/{novel_id}/interaction"),
                None,
            )
            .await?;
        Ok(envelope.data)
    }

    /// Partially update the caller's interaction with a novel. `None`
    /// fields keep their current value.
    pub async fn update_interaction(
        &self,
        novel_id: i64,
        is_following: Option<bool>,
        is_wishlisted: Option<bool>,
        reading_progress: Option<f64>,
    ) -> Result<NovelInteraction, ClientError> {
        let payload = serde_json::json!({
            "is_following": is_following,
            "is_wishlisted": is_wishlisted,
            "reading_progress": reading_progress,
        });
        let envelope: DataEnvelope<NovelInteraction> = self
            .send(
                Method::PUT,
                &format!("/api/v1/novels/{novel_id}/interaction"),
                Some(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// The caller's library: followed and wishlisted novels.
    pub async fn library(&self) -> Result<Vec<LibraryEntry>, ClientError> {
        let envelope: DataEnvelope<Vec<LibraryEntry>> =
            self.send(Method::GET, "/api/v1/me/library", None).await?;
        Ok(envelope.data)
    }

    /// The caller's notifications, newest first.
    pub async fn notifications(&self) -> Result<Vec<Notification>, ClientError> {
        let envelope: DataEnvelope<Vec<Notification>> =
            self.send(Method::GET, "/api/v1/notifications", None).await?;
        Ok(envelope.data)
    }

    /// Mark a notification as read.
    pub async fn mark_notification_read(&self, id: i64) -> Result<(), ClientError> {
        self.send_no_content(Method::POST, &format!("/api/v1/notifications/{id}/read"), None)
            .await
    }
}

/// Minimal percent-encoding for query values.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// TTL cache around the novel listing, exposing a [`Resource`] state the
/// browse screen can observe.
pub struct CatalogCache {
    client: FableClient,
    ttl: Duration,
    fetched_at: Mutex<Option<Instant>>,
    state: watch::Sender<Resource<Vec<NovelSummary>>>,
}

impl CatalogCache {
    pub fn new(client: FableClient, ttl: Duration) -> Self {
        let (state, _rx) = watch::channel(Resource::Loading);
        Self {
            client,
            ttl,
            fetched_at: Mutex::new(None),
            state,
        }
    }

    /// The current catalog state.
    pub fn state(&self) -> Resource<Vec<NovelSummary>> {
        self.state.borrow().clone()
    }

    /// Subscribe to catalog state changes.
    pub fn subscribe(&self) -> watch::Receiver<Resource<Vec<NovelSummary>>> {
        self.state.subscribe()
    }

    /// Return the cached listing when it is still fresh, otherwise fetch.
    pub async fn get(&self) -> Result<Vec<NovelSummary>, ClientError> {
        let fresh = {
            let fetched_at = self.fetched_at.lock().map_err(|_| {
                ClientError::Configuration("catalog cache mutex poisoned".into())
            })?;
            fetched_at.is_some_and(|t| t.elapsed() < self.ttl)
        };
        if fresh {
            if let Resource::Success(cached) = self.state() {
                return Ok(cached);
            }
        }
        self.refresh().await
    }

    /// Fetch the listing unconditionally and overwrite the cached value.
    ///
    /// A fetch failure replaces the state with `Error` only when nothing is
    /// cached yet; a stale catalog beats an empty screen.
    pub async fn refresh(&self) -> Result<Vec<NovelSummary>, ClientError> {
        match self.client.novels(None).await {
            Ok(novels) => {
                self.state.send_replace(Resource::Success(novels.clone()));
                if let Ok(mut fetched_at) = self.fetched_at.lock() {
                    *fetched_at = Some(Instant::now());
                }
                Ok(novels)
            }
            Err(e) => {
                if !matches!(&*self.state.borrow(), Resource::Success(_)) {
                    self.state.send_replace(Resource::Error(e.to_string()));
                }
                Err(e)
            }
        }
    }
}
