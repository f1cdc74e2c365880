//! Post handler for `https://e621.net`
//!
//! Also covers `e926.net` (the SFW mirror) and `e6ai.net`, which share the same API. The
//! response wraps the post in a `post` object and gives tags as lists, one per category.
use btk_common::{
    log::debug,
    post::{size::ImageSize, tags::TagCategory, ParsedPost},
    serde::Deserialize,
    serde_json::Value,
};

use crate::{error::ExtractorError, tags::normalize_tag_list};

use self::models::{E621File, E621Post, E621TopLevel};

use super::{non_empty, BooruHandler, HandlerFeatures};

pub mod models;

/// Main object to fetch and parse e621/e926/e6ai posts
#[derive(Debug, Clone, Copy, Default)]
pub struct E621Handler;

impl E621Handler {
    pub const NAME: &'static str = "e621/e6ai";

    pub const fn new() -> Self {
        Self
    }

    fn select_file(post: &E621Post, img_size: ImageSize) -> Option<&E621File> {
        match img_size {
            ImageSize::Original => post.file.as_ref(),
            ImageSize::Sample => post.sample.as_ref(),
            _ => post.preview.as_ref(),
        }
    }
}

impl BooruHandler for E621Handler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_domains(&self) -> &'static [&'static str] {
        &["e621.net", "e926.net", "e6ai.net"]
    }

    fn features(&self) -> HandlerFeatures {
        HandlerFeatures::CATEGORIZED_TAGS | HandlerFeatures::SPECIES_TAGS
    }

    fn parse(&self, response: &Value, img_size: ImageSize) -> Result<ParsedPost, ExtractorError> {
        if !response.is_object() {
            return Err(ExtractorError::UnexpectedStructure {
                message: String::from("expected an object with a `post` field"),
            });
        }

        let raw = E621TopLevel::deserialize(response)?.post.unwrap_or_default();
        debug!("Parsing e621 post {:?}", raw.id);

        let (width, height) = raw
            .file
            .as_ref()
            .map_or((0, 0), |f| (f.width.unwrap_or(0), f.height.unwrap_or(0)));

        let mut post = ParsedPost {
            width,
            height,
            ..ParsedPost::default()
        };

        let tags = &raw.tags;
        let categories = [
            (TagCategory::General, tags.general.as_ref()),
            (TagCategory::Character, tags.character.as_ref()),
            (TagCategory::Contributor, tags.contributor.as_ref()),
            (TagCategory::Copyright, tags.copyright.as_ref()),
            (TagCategory::Artist, tags.artist_or_director()),
            (TagCategory::Species, tags.species.as_ref()),
            (TagCategory::Meta, tags.meta.as_ref()),
        ];

        for (category, list) in categories {
            if let Some(list) = list {
                post.insert_tags(category, normalize_tag_list(list));
            }
        }

        if img_size.wants_image() {
            post.image_url = non_empty(
                Self::select_file(&raw, img_size).and_then(|f| f.url.as_deref()),
            )
            .or_else(|| non_empty(raw.file_url()))
            .map(ToString::to_string);
        }

        Ok(post)
    }
}

#[cfg(test)]
mod test {
    use btk_common::{
        post::{size::ImageSize, tags::TagCategory},
        serde_json::json,
    };

    use super::E621Handler;
    use crate::handlers::BooruHandler;

    #[test]
    fn parses_list_tags() {
        let raw = json!({
            "post": {
                "tags": {"general": ["cat", "dog"], "artist": []},
                "file": {"width": 800, "height": 600, "url": "http://x/f.jpg"}
            }
        });

        let post = E621Handler::new().parse(&raw, ImageSize::None).unwrap();

        assert_eq!(post.tags.len(), 1);
        assert_eq!(post.tags_for(TagCategory::General), "cat, dog");
        assert_eq!((post.width, post.height), (800, 600));
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn director_replaces_missing_artist() {
        let raw = json!({
            "post": {"tags": {"artist": [], "director": ["some_director"]}}
        });
        let post = E621Handler::new().parse(&raw, ImageSize::None).unwrap();
        assert_eq!(post.tags_for(TagCategory::Artist), "some_director");

        let raw = json!({
            "post": {"tags": {"artist": ["painter"], "director": ["some_director"]}}
        });
        let post = E621Handler::new().parse(&raw, ImageSize::None).unwrap();
        assert_eq!(post.tags_for(TagCategory::Artist), "painter");
    }

    #[test]
    fn sizes_collapse_to_available_files() {
        let raw = json!({
            "post": {
                "file": {"width": 2000, "height": 1000, "url": "http://x/file.png"},
                "sample": {"url": "http://x/sample.jpg"},
                "preview": {"url": "http://x/preview.jpg"}
            }
        });
        let handler = E621Handler::new();

        let url = |size| handler.parse(&raw, size).unwrap().image_url;
        assert_eq!(url(ImageSize::Original).as_deref(), Some("http://x/file.png"));
        assert_eq!(url(ImageSize::Sample).as_deref(), Some("http://x/sample.jpg"));
        assert_eq!(url(ImageSize::Px180).as_deref(), Some("http://x/preview.jpg"));
        assert_eq!(url(ImageSize::Px720).as_deref(), Some("http://x/preview.jpg"));
    }

    #[test]
    fn falls_back_to_file_url() {
        let raw = json!({
            "post": {
                "file": {"url": "http://x/file.png"},
                "sample": {"url": null}
            }
        });
        let handler = E621Handler::new();

        let post = handler.parse(&raw, ImageSize::Sample).unwrap();
        assert_eq!(post.image_url.as_deref(), Some("http://x/file.png"));

        let post = handler.parse(&raw, ImageSize::Px360).unwrap();
        assert_eq!(post.image_url.as_deref(), Some("http://x/file.png"));
    }

    #[test]
    fn missing_post_resolves_to_defaults() {
        let post = E621Handler::new()
            .parse(&json!({}), ImageSize::Original)
            .unwrap();
        assert!(post.tags.is_empty());
        assert_eq!((post.width, post.height), (0, 0));
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn recognizes_domains() {
        let handler = E621Handler::new();
        assert!(handler.can_handle("https://e621.net/posts/1"));
        assert!(handler.can_handle("https://e926.net/posts/1"));
        assert!(handler.can_handle("https://e6ai.net/posts/1"));
        assert!(!handler.can_handle("https://note621.net/posts/1"));
    }
}
