//! Post handler for `https://danbooru.donmai.us`
//!
//! Also serves as the base for the other Danbooru-based services, like AIBooru, which share the
//! same `tag_string_*` response layout.
use btk_common::{
    log::debug,
    post::{size::ImageSize, tags::TagCategory, ParsedPost},
    serde::Deserialize,
    serde_json::Value,
};

use crate::{error::ExtractorError, tags::normalize_tag_string};

use self::models::DanbooruPost;

use super::{non_empty, BooruHandler, HandlerFeatures};

pub mod models;

/// Main object to fetch and parse Danbooru posts
#[derive(Debug, Clone, Copy, Default)]
pub struct DanbooruHandler;

impl DanbooruHandler {
    pub const NAME: &'static str = "Danbooru";

    pub const fn new() -> Self {
        Self
    }
}

impl BooruHandler for DanbooruHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_domains(&self) -> &'static [&'static str] {
        &["danbooru.donmai.us", "safebooru.donmai.us", "donmai.moe"]
    }

    fn features(&self) -> HandlerFeatures {
        HandlerFeatures::CATEGORIZED_TAGS | HandlerFeatures::SIZE_VARIANTS
    }

    fn parse(&self, response: &Value, img_size: ImageSize) -> Result<ParsedPost, ExtractorError> {
        parse_danbooru_style(response, img_size, false)
    }
}

/// Maps a Danbooru-like post object into a [`ParsedPost`].
///
/// `include_model` adds the `tag_string_model` category only AIBooru has.
pub(crate) fn parse_danbooru_style(
    response: &Value,
    img_size: ImageSize,
    include_model: bool,
) -> Result<ParsedPost, ExtractorError> {
    if !response.is_object() {
        return Err(ExtractorError::UnexpectedStructure {
            message: String::from("expected a post object"),
        });
    }

    let raw = DanbooruPost::deserialize(response)?;
    debug!("Parsing Danbooru-like post {:?}", raw.id);

    let mut post = ParsedPost {
        width: raw.image_width.unwrap_or(0),
        height: raw.image_height.unwrap_or(0),
        ..ParsedPost::default()
    };

    let mut categories = vec![
        (TagCategory::General, &raw.tag_string_general),
        (TagCategory::Character, &raw.tag_string_character),
        (TagCategory::Copyright, &raw.tag_string_copyright),
        (TagCategory::Artist, &raw.tag_string_artist),
        (TagCategory::Meta, &raw.tag_string_meta),
    ];
    if include_model {
        categories.push((TagCategory::Model, &raw.tag_string_model));
    }

    for (category, tags) in categories {
        if let Some(tags) = tags {
            post.insert_tags(category, normalize_tag_string(tags));
        }
    }

    if img_size.wants_image() {
        post.image_url = non_empty(raw.variant_url(img_size.as_str()))
            .or_else(|| non_empty(raw.file_url.as_deref()))
            .map(ToString::to_string);
    }

    Ok(post)
}

#[cfg(test)]
mod test {
    use btk_common::{
        post::{size::ImageSize, tags::TagCategory},
        serde_json::json,
    };

    use super::DanbooruHandler;
    use crate::handlers::BooruHandler;

    #[test]
    fn parses_flat_post() {
        let raw = json!({
            "tag_string_general": "cat dog",
            "tag_string_character": "",
            "image_width": 800,
            "image_height": 600,
            "file_url": "http://x/img.jpg"
        });

        let post = DanbooruHandler::new()
            .parse(&raw, ImageSize::Original)
            .unwrap();

        assert_eq!(post.tags.len(), 1);
        assert_eq!(post.tags_for(TagCategory::General), "cat, dog");
        assert_eq!(post.width, 800);
        assert_eq!(post.height, 600);
        assert_eq!(post.image_url.as_deref(), Some("http://x/img.jpg"));
    }

    #[test]
    fn picks_requested_variant() {
        let raw = json!({
            "file_url": "http://x/full.png",
            "media_asset": {
                "variants": [
                    {"type": "180x180", "url": "http://x/180.jpg"},
                    {"type": "720x720", "url": "http://x/720.webp"},
                    {"type": "original", "url": "http://x/full.png"}
                ]
            }
        });
        let handler = DanbooruHandler::new();

        let post = handler.parse(&raw, ImageSize::Px720).unwrap();
        assert_eq!(post.image_url.as_deref(), Some("http://x/720.webp"));

        let post = handler.parse(&raw, ImageSize::Sample).unwrap();
        assert_eq!(post.image_url.as_deref(), Some("http://x/full.png"));

        let post = handler.parse(&raw, ImageSize::None).unwrap();
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn missing_fields_resolve_to_defaults() {
        let post = DanbooruHandler::new()
            .parse(&json!({}), ImageSize::Sample)
            .unwrap();

        assert!(post.tags.is_empty());
        assert_eq!((post.width, post.height), (0, 0));
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn ignores_model_tags() {
        let raw = json!({"tag_string_model": "nai_diffusion"});
        let post = DanbooruHandler::new().parse(&raw, ImageSize::None).unwrap();
        assert_eq!(post.tags_for(TagCategory::Model), "");
    }

    #[test]
    fn rejects_non_object() {
        let handler = DanbooruHandler::new();
        assert!(handler.parse(&json!([1, 2]), ImageSize::None).is_err());
        assert!(handler.parse(&json!("post"), ImageSize::None).is_err());
    }

    #[test]
    fn recognizes_domains() {
        let handler = DanbooruHandler::new();
        assert!(handler.can_handle("https://danbooru.donmai.us/posts/1"));
        assert!(handler.can_handle("https://safebooru.donmai.us/posts/1"));
        assert!(!handler.can_handle("https://aibooru.online/posts/1"));
    }
}
