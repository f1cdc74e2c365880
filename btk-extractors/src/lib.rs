//! Booru service handlers, the handler registry and the tag processing pipeline.
//!
//! Each supported service (Danbooru, AIBooru, e621/e6ai and Gelbooru) has a handler
//! implementing [`BooruHandler`](handlers::BooruHandler), which knows how to recognize the
//! service's post URLs, query its JSON API and map the response into a
//! [`ParsedPost`](btk_common::post::ParsedPost).

extern crate btk_common;

pub mod error;
pub mod handlers;
pub mod prelude;
pub mod registry;
pub mod tags;

mod test;
