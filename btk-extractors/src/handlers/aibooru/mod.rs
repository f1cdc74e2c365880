//! Post handler for `https://aibooru.online`
//!
//! AIBooru runs a Danbooru fork, so parsing is shared with
//! [`DanbooruHandler`](super::danbooru::DanbooruHandler).
//! On top of the usual categories it exposes the generation model tags, and some of its media
//! URLs are protocol-relative (`//cdn.aibooru.download/...`).
use btk_common::{
    post::{size::ImageSize, ParsedPost},
    serde_json::Value,
};

use crate::error::ExtractorError;

use super::{danbooru::parse_danbooru_style, BooruHandler, HandlerFeatures};

/// Main object to fetch and parse AIBooru posts
#[derive(Debug, Clone, Copy, Default)]
pub struct AIBooruHandler;

impl AIBooruHandler {
    pub const NAME: &'static str = "AIBooru";

    pub const fn new() -> Self {
        Self
    }
}

impl BooruHandler for AIBooruHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_domains(&self) -> &'static [&'static str] {
        &["aibooru.online", "safe.shargone.com"]
    }

    fn features(&self) -> HandlerFeatures {
        HandlerFeatures::CATEGORIZED_TAGS | HandlerFeatures::SIZE_VARIANTS
    }

    fn parse(&self, response: &Value, img_size: ImageSize) -> Result<ParsedPost, ExtractorError> {
        let mut post = parse_danbooru_style(response, img_size, true)?;
        post.image_url = post.image_url.map(fix_protocol);
        Ok(post)
    }
}

/// Turns `//host/path` into `https://host/path`.
fn fix_protocol(url: String) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url,
    }
}

#[cfg(test)]
mod test {
    use btk_common::{
        post::{size::ImageSize, tags::TagCategory},
        serde_json::json,
    };

    use super::AIBooruHandler;
    use crate::handlers::BooruHandler;

    #[test]
    fn includes_model_tags() {
        let raw = json!({
            "tag_string_general": "1girl solo",
            "tag_string_model": "nai_diffusion anything_v3",
            "image_width": 512,
            "image_height": 768
        });

        let post = AIBooruHandler::new().parse(&raw, ImageSize::None).unwrap();

        assert_eq!(post.tags_for(TagCategory::Model), "nai_diffusion, anything_v3");
        assert_eq!(post.tags_for(TagCategory::General), "1girl, solo");
        assert_eq!((post.width, post.height), (512, 768));
    }

    #[test]
    fn protocol_relative_urls_become_https() {
        let raw = json!({
            "file_url": "//cdn.aibooru.download/original/a.png",
            "media_asset": {"variants": [
                {"type": "360x360", "url": "//cdn.aibooru.download/360/a.jpg"}
            ]}
        });
        let handler = AIBooruHandler::new();

        let post = handler.parse(&raw, ImageSize::Px360).unwrap();
        assert_eq!(
            post.image_url.as_deref(),
            Some("https://cdn.aibooru.download/360/a.jpg")
        );

        let post = handler.parse(&raw, ImageSize::Original).unwrap();
        assert_eq!(
            post.image_url.as_deref(),
            Some("https://cdn.aibooru.download/original/a.png")
        );
    }

    #[test]
    fn absolute_urls_are_kept() {
        let raw = json!({"file_url": "https://cdn.aibooru.download/a.png"});
        let post = AIBooruHandler::new()
            .parse(&raw, ImageSize::Original)
            .unwrap();
        assert_eq!(post.image_url.as_deref(), Some("https://cdn.aibooru.download/a.png"));
    }
}
