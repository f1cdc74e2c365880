//! Main representation of a parsed imageboard post
//!
//! # ParsedPost
//! A [`ParsedPost`] is the uniform output of every handler's parse step: the post's tags split
//! into categories, the original dimensions and the URL of the requested image variant.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use self::tags::TagCategory;

pub mod size;
pub mod tags;

/// Tags of a post keyed by category, in declaration order of [`TagCategory`].
///
/// Values are always `tag_a, tag_b` strings.
pub type TagMap = BTreeMap<TagCategory, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPost {
    /// Only categories with at least one tag are present.
    pub tags: TagMap,
    /// Width of the original file. `0` if unknown.
    pub width: u64,
    /// Height of the original file. `0` if unknown.
    pub height: u64,
    /// URL of the selected image variant.
    ///
    /// `None` when no image was requested or the service didn't provide one.
    pub image_url: Option<String>,
}

impl ParsedPost {
    /// Inserts a normalized tag string, skipping empty ones.
    pub fn insert_tags(&mut self, category: TagCategory, tags: String) {
        if !tags.is_empty() {
            self.tags.insert(category, tags);
        }
    }

    /// Tags of a category, or `""` if the post has none.
    #[inline]
    pub fn tags_for(&self, category: TagCategory) -> &str {
        self.tags.get(&category).map_or("", String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::{tags::TagCategory, ParsedPost};

    #[test]
    fn empty_categories_are_omitted() {
        let mut post = ParsedPost::default();
        post.insert_tags(TagCategory::General, "cat, dog".to_string());
        post.insert_tags(TagCategory::Character, String::new());

        assert_eq!(post.tags.len(), 1);
        assert_eq!(post.tags_for(TagCategory::General), "cat, dog");
        assert_eq!(post.tags_for(TagCategory::Character), "");
    }
}
