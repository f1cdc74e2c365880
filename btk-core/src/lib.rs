//! Post fetching pipeline of booru-toolkit.
//!
//! [`PostFetcher`](fetcher::PostFetcher) ties the pieces together: it resolves a handler from the
//! [`HandlerRegistry`](btk_extractors::registry::HandlerRegistry), fetches and parses the post,
//! downloads its image (or falls back to a placeholder) and runs the tag processing options.
//!
//! ```rust,no_run
//! use btk_core::fetcher::fetch_post;
//!
//! async fn run() {
//!     let result = fetch_post(
//!         "https://danbooru.donmai.us/posts/1",
//!         "auto",
//!         "sample",
//!         true,
//!         false,
//!         true,
//!         btk_extractors::tags::DEFAULT_EXCLUDED_TAGS,
//!     )
//!     .await
//!     .unwrap();
//!
//!     println!("{:#?}", result.tags);
//! }
//! ```
pub use image;

pub mod error;
pub mod fetcher;
pub mod media;
pub mod preset;
pub mod request;
pub mod result;
