//! Handlers that fetch a single post from a booru API and parse it into a [`ParsedPost`].
//! # Handlers
//!
//! Every service implements [`BooruHandler`]. A handler knows which hostnames belong to it,
//! how to turn a post page URL into its JSON API endpoint and how to map the service-specific
//! response into the common tag/dimension/image-URL record.
//!
//! Handlers are stateless unit structs, so a single instance can be shared by any number of
//! concurrent requests. See [`HandlerRegistry`](crate::registry::HandlerRegistry) to pick one.
//!
//! ## Example with the `Danbooru` handler
//! ```rust,no_run
//! use btk_common::{client, post::size::ImageSize, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
//! use btk_extractors::handlers::{danbooru::DanbooruHandler, BooruHandler};
//!
//! async fn test() {
//!     let client = client!(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).unwrap();
//!     let url = "https://danbooru.donmai.us/posts/1";
//!
//!     let handler = DanbooruHandler::new();
//!     assert!(handler.can_handle(url));
//!
//!     let raw = handler.fetch(&client, url).await.unwrap();
//!     let post = handler.parse(&raw, ImageSize::Sample).unwrap();
//!
//!     println!("{:#?}", post.tags);
//! }
//! ```
use std::fmt::Debug;

use async_trait::async_trait;
use bitflags::bitflags;
use btk_common::{
    log::{debug, info},
    post::{size::ImageSize, ParsedPost},
    reqwest::{Client, Url},
    serde_json::{self, Value},
};

use crate::error::ExtractorError;

pub mod aibooru;
pub mod danbooru;
pub mod e621;
pub mod gelbooru;

bitflags! {
    /// What a handler is able to extract from its service.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HandlerFeatures: u8 {
        /// Tags are split into categories instead of a single merged list.
        const CATEGORIZED_TAGS = 0b0000_0001;
        /// Offers the 180x180/360x360/720x720 image variants.
        const SIZE_VARIANTS = 0b0000_0010;
        /// Forwards `api_key`/`user_id` embedded in the post URL.
        const URL_CREDENTIALS = 0b0000_0100;
        /// Has a species tag category.
        const SPECIES_TAGS = 0b0000_1000;
    }
}

/// Common interface all booru service handlers expose.
#[async_trait]
pub trait BooruHandler: Debug + Send + Sync {
    /// Unique human-readable name of the service.
    fn name(&self) -> &'static str;

    /// Hostnames handled by this service. Subdomains of these are handled too.
    fn supported_domains(&self) -> &'static [&'static str];

    /// Expose some bitflags to indicate what this handler can extract
    fn features(&self) -> HandlerFeatures;

    /// Check if this handler can process the given URL, based on its hostname.
    fn can_handle(&self, url: &str) -> bool {
        host_matches(url, self.supported_domains())
    }

    /// Convert a post URL into the JSON API URL of the post.
    ///
    /// By default the query string is dropped and `.json` is appended, unless the URL already
    /// points to a `.json` resource.
    fn get_api_url(&self, url: &str) -> Result<String, ExtractorError> {
        Ok(json_api_url(url))
    }

    /// Fetch the raw JSON of the post from the API.
    ///
    /// Performs a single `GET` with the supplied client. Non-2xx statuses and bodies that are
    /// not valid JSON are errors; nothing is retried.
    async fn fetch(&self, client: &Client, url: &str) -> Result<Value, ExtractorError> {
        let api_url = self.get_api_url(url)?;
        info!("Fetching from {}: {}", self.name(), redact_credentials(&api_url));

        let response = client.get(&api_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ExtractorError::HttpStatus {
                status,
                url: redact_credentials(&api_url),
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes from {}", body.len(), self.name());

        serde_json::from_str(&body)
            .map_err(|source| ExtractorError::InvalidServerResponse { source })
    }

    /// Extract tag data, dimensions and the image URL for `img_size` from an API response.
    ///
    /// Missing fields never fail the parse: absent tag categories are left out, unknown
    /// dimensions are `0` and a missing image URL is `None`.
    fn parse(&self, response: &Value, img_size: ImageSize) -> Result<ParsedPost, ExtractorError>;
}

/// `true` if the URL's hostname equals one of `domains` or is a subdomain of one of them.
pub fn host_matches(url: &str, domains: &[&str]) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    domains.iter().any(|domain| {
        let domain = domain.to_ascii_lowercase();
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|label| label.ends_with('.'))
    })
}

/// Default post URL to API URL conversion shared by the Danbooru-like and e621-like services.
pub fn json_api_url(url: &str) -> String {
    let url = url.trim();
    if url.contains(".json") {
        return url.to_string();
    }

    let base = url.split(['?', '#']).next().unwrap_or(url);
    format!("{}.json", base.trim_end_matches('/'))
}

/// Replaces the value of an `api_key` query parameter so URLs can be logged.
pub fn redact_credentials(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    if !parsed
        .query_pairs()
        .any(|(k, _)| k.eq_ignore_ascii_case("api_key"))
    {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            if k.eq_ignore_ascii_case("api_key") {
                (k.into_owned(), String::from("***"))
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

/// Empty strings count as a missing URL.
#[inline]
pub(crate) fn non_empty(url: Option<&str>) -> Option<&str> {
    url.filter(|u| !u.trim().is_empty())
}

#[cfg(test)]
mod test {
    use super::{host_matches, json_api_url, redact_credentials};

    const DOMAINS: &[&str] = &["danbooru.donmai.us", "donmai.moe"];

    #[test]
    fn matches_exact_and_sub_labels() {
        assert!(host_matches("https://danbooru.donmai.us/posts/1", DOMAINS));
        assert!(host_matches("https://sub.danbooru.donmai.us/posts/1", DOMAINS));
        assert!(host_matches("https://DANBOORU.donmai.us/posts/1", DOMAINS));
        assert!(host_matches("http://donmai.moe/posts/1?q=1", DOMAINS));
    }

    #[test]
    fn rejects_substring_hosts() {
        assert!(!host_matches("https://notdanbooru.donmai.us/posts/1", DOMAINS));
        assert!(!host_matches("https://danbooru.donmai.us.evil.com/posts/1", DOMAINS));
        assert!(!host_matches("https://e621.net/posts/1", DOMAINS));
        assert!(!host_matches("danbooru.donmai.us/posts/1", DOMAINS));
        assert!(!host_matches("", DOMAINS));
    }

    #[test]
    fn api_url_appends_json() {
        assert_eq!(
            json_api_url("https://danbooru.donmai.us/posts/123?q=cat"),
            "https://danbooru.donmai.us/posts/123.json"
        );
        assert_eq!(
            json_api_url("https://e621.net/posts/5/"),
            "https://e621.net/posts/5.json"
        );
        assert_eq!(
            json_api_url("https://e621.net/posts/5.json?x=1"),
            "https://e621.net/posts/5.json?x=1"
        );
    }

    #[test]
    fn api_key_is_redacted() {
        let url = "https://gelbooru.com/index.php?id=1&api_key=secret&user_id=9";
        let redacted = redact_credentials(url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("user_id=9"));

        let plain = "https://danbooru.donmai.us/posts/1.json";
        assert_eq!(redact_credentials(plain), plain);
    }
}
