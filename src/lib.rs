//! Download an image from a URL, display it, and keep a PNG copy on disk.
//!
//! The entry point is [`download::download_image`]; the window in
//! `main.rs` drives the same workflow through
//! [`download::download_image_async`].

pub mod download;
pub mod error;
pub mod notify;
pub mod ui;
