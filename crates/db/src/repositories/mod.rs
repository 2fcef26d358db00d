pub mod chapter_repo;
pub mod comment_repo;
pub mod image_repo;
pub mod interaction_repo;
pub mod notification_repo;
pub mod novel_repo;
pub mod review_repo;
pub mod session_repo;
pub mod user_repo;

pub use chapter_repo::ChapterRepo;
pub use comment_repo::CommentRepo;
pub use image_repo::ImageRepo;
pub use interaction_repo::InteractionRepo;
pub use notification_repo::NotificationRepo;
pub use novel_repo::NovelRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

/// Maximum page size enforced across listing queries.
pub const MAX_LIMIT: i64 = 100;

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Clamp a caller-supplied limit into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a caller-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
