//! Common data structs shared by all Booru Toolkit crates.
//!
//! Holds the service-agnostic representation of a fetched post, the tag categories and image
//! size variants understood by every handler, plus the defaults used to build the HTTP client.
use std::time::Duration;

// Public Exports
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;

pub mod macros;
pub mod post;

/// Default `User-Agent` sent to every booru API.
///
/// Follows the `<product>/<version> (<contact>)` format most boorus ask for, and always follows
/// the version declared inside ```Cargo.toml```
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Booru Toolkit/",
    env!("CARGO_PKG_VERSION"),
    " (by booru-toolkit on GitHub)"
);

/// Time limit for a single blocking network call (metadata or image).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
