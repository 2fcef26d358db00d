pub mod admin;
pub mod auth;
pub mod chapter;
pub mod comment;
pub mod image;
pub mod interaction;
pub mod notification;
pub mod novel;
pub mod review;
