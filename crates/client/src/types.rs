//! Wire types shared by the client methods.
//!
//! Auth endpoints use a camelCase envelope (`{ success, data }`); resource
//! endpoints wrap their payload in `{ data }` with snake_case fields.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Envelope returned by `/auth/*` endpoints.
#[derive(Debug, Deserialize)]
pub struct AuthEnvelope<T> {
    pub success: bool,
    pub data: T,
}

/// Envelope returned by resource endpoints.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

// ---------------------------------------------------------------------------
// Auth payloads
// ---------------------------------------------------------------------------

/// Token pair and user identity returned by login, register, and refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthPayload`].
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Catalog resources
// ---------------------------------------------------------------------------

/// Catalog listing entry with aggregate counts.
#[derive(Debug, Clone, Deserialize)]
pub struct NovelSummary {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub genre: String,
    pub status: String,
    pub cover_image_id: Option<i64>,
    pub chapter_count: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Full novel detail.
#[derive(Debug, Clone, Deserialize)]
pub struct Novel {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub description: String,
    pub genre: String,
    pub status: String,
    pub cover_image_id: Option<i64>,
    pub is_published: bool,
}

/// Chapter listing entry without the body text.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterSummary {
    pub id: i64,
    pub novel_id: i64,
    pub chapter_number: i32,
    pub title: String,
    pub word_count: i32,
    pub is_published: bool,
}

/// Full chapter for the reading screen.
#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub id: i64,
    pub novel_id: i64,
    pub chapter_number: i32,
    pub title: String,
    pub body: String,
    pub word_count: i32,
}

/// A reader comment, joined with the author's username.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub novel_id: i64,
    pub chapter_id: Option<i64>,
    pub body: String,
}

/// A review, joined with the reviewer's username.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub novel_id: i64,
    pub rating: i32,
    pub body: String,
}

/// The caller's interaction record for one novel.
#[derive(Debug, Clone, Deserialize)]
pub struct NovelInteraction {
    pub novel_id: i64,
    pub is_following: bool,
    pub is_wishlisted: bool,
    pub last_read_chapter_id: Option<i64>,
    pub reading_progress: f64,
}

/// Library listing entry: interaction plus novel summary fields.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryEntry {
    pub novel_id: i64,
    pub title: String,
    pub author_name: String,
    pub genre: String,
    pub status: String,
    pub is_following: bool,
    pub is_wishlisted: bool,
    pub last_read_chapter_id: Option<i64>,
    pub reading_progress: f64,
}

/// A notification row.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
}

// ---------------------------------------------------------------------------
// Loadable resource state
// ---------------------------------------------------------------------------

/// State of an asynchronously loaded value, for UI layers that render
/// loading, loaded, and failed states differently.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// A load is in flight and no value is available yet.
    Loading,
    /// The value loaded successfully.
    Success(T),
    /// The load failed; carries a display message.
    Error(String),
}

impl<T> Resource<T> {
    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Resource::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }
}
