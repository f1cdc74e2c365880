//! Post handler for `https://gelbooru.com`
//!
//! Also works with `safebooru.org`, an unrelated Gelbooru install (not to be confused with
//! `safebooru.donmai.us`).
//!
//! Gelbooru's API doesn't split tags into categories, so every tag ends up under
//! [`TagCategory::All`].
//!
//! # Authentication
//! Gelbooru requires an API key for its DAPI since it started getting flooded with requests.
//! Append `&api_key=...&user_id=...` (found in the account options page) to the post URL and
//! they will be forwarded to the API query. Without both of them, the request is sent anonymously.
use btk_common::{
    log::{debug, warn},
    post::{size::ImageSize, tags::TagCategory, ParsedPost},
    reqwest::Url,
    serde::Deserialize,
    serde_json::Value,
};

use crate::{error::ExtractorError, tags::normalize_tag_string};

use self::models::GelbooruPost;

use super::{non_empty, BooruHandler, HandlerFeatures};

pub mod models;

/// Main object to fetch and parse Gelbooru posts
#[derive(Debug, Clone, Copy, Default)]
pub struct GelbooruHandler;

impl GelbooruHandler {
    pub const NAME: &'static str = "Gelbooru";

    pub const fn new() -> Self {
        Self
    }

    /// Finds the post in the response.
    ///
    /// The current API wraps a list in `post`, single post queries sometimes return a bare
    /// object there, and the old 0.2 API (still used by safebooru.org) returns the list at the
    /// top level. A response without any post resolves to defaults.
    fn extract_post(response: &Value) -> Result<GelbooruPost, ExtractorError> {
        let post = match response {
            Value::Object(map) => map.get("post").unwrap_or(&Value::Null),
            Value::Array(_) => response,
            _ => {
                return Err(ExtractorError::UnexpectedStructure {
                    message: String::from("expected an object or a list of posts"),
                })
            }
        };

        match post {
            Value::Null => Ok(GelbooruPost::default()),
            Value::Array(list) => match list.first() {
                Some(first) => Ok(GelbooruPost::deserialize(first)?),
                None => Ok(GelbooruPost::default()),
            },
            Value::Object(_) => Ok(GelbooruPost::deserialize(post)?),
            _ => Err(ExtractorError::UnexpectedStructure {
                message: String::from("`post` is neither an object nor a list"),
            }),
        }
    }
}

impl BooruHandler for GelbooruHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_domains(&self) -> &'static [&'static str] {
        &["gelbooru.com", "safebooru.org"]
    }

    fn features(&self) -> HandlerFeatures {
        HandlerFeatures::URL_CREDENTIALS
    }

    /// Rewrites `index.php?page=post&s=view&id=N` into the DAPI query for post `N`.
    ///
    /// URLs that already are DAPI queries are used as they are.
    fn get_api_url(&self, url: &str) -> Result<String, ExtractorError> {
        let url = url.trim();
        let parsed = Url::parse(url).map_err(|e| ExtractorError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let param = |name: &str| {
            parsed
                .query_pairs()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };

        if param("page").as_deref() == Some("dapi") {
            return Ok(url.to_string());
        }

        let Some(id) = param("id") else {
            return Err(ExtractorError::InvalidUrl {
                url: url.to_string(),
                reason: String::from("missing the `id` query parameter"),
            });
        };

        let mut api = parsed.clone();
        api.set_path("/index.php");
        api.set_fragment(None);
        {
            let mut query = api.query_pairs_mut();
            query
                .clear()
                .append_pair("page", "dapi")
                .append_pair("s", "post")
                .append_pair("q", "index")
                .append_pair("id", &id)
                .append_pair("json", "1");

            match (param("api_key"), param("user_id")) {
                (Some(key), Some(user)) => {
                    query.append_pair("api_key", &key).append_pair("user_id", &user);
                }
                (None, None) => debug!("No Gelbooru credentials in URL, querying anonymously"),
                _ => warn!("Gelbooru needs both api_key and user_id, ignoring the one supplied"),
            }
        }

        Ok(api.to_string())
    }

    fn parse(&self, response: &Value, img_size: ImageSize) -> Result<ParsedPost, ExtractorError> {
        let raw = Self::extract_post(response)?;
        debug!("Parsing Gelbooru post {:?}", raw.id);

        let mut post = ParsedPost {
            width: raw.width,
            height: raw.height,
            ..ParsedPost::default()
        };

        if let Some(tags) = &raw.tags {
            post.insert_tags(TagCategory::All, normalize_tag_string(tags));
        }

        let file_url = non_empty(raw.file_url.as_deref());
        post.image_url = match img_size {
            ImageSize::None => None,
            ImageSize::Original => file_url,
            ImageSize::Sample => non_empty(raw.sample_url.as_deref()).or(file_url),
            _ => non_empty(raw.preview_url.as_deref()).or(file_url),
        }
        .map(ToString::to_string);

        Ok(post)
    }
}
