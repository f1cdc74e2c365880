//! Tag normalization and post-processing
//!
//! # Tag strings
//! Danbooru-like services return each tag category as a single space separated string, while
//! e621 returns a list of tags. Both are normalized into the same `tag_a, tag_b` form, so the
//! processing steps below never need to know which service the tags came from.
//!
//! # Processing
//! After parsing, the tags of every category can go through three optional steps, always in
//! this order:
//! 1. **Exclusion**: removes the tags found in a user supplied list. Runs on the raw tags, so
//!    `third-party edit` matches `third-party_edit` and `hat \(blue\)` matches `hat_(blue)`.
//! 2. **Formatting**: replaces underscores with spaces and escapes parentheses (`\(`, `\)`) so
//!    the tags can be used directly in a prompt.
//! 3. **Trailing comma**: appends a `,` to every non-empty category.
use ahash::AHashSet;
use btk_common::{
    join_tags,
    log::debug,
    post::TagMap,
    serde::{self, Deserialize, Serialize},
};

/// Tags excluded by default, mostly meta tags that are useless as prompt tags.
pub const DEFAULT_EXCLUDED_TAGS: &str = "conditional dnp, sound_warning, unknown_artist, third-party_edit, anonymous_artist, e621, e621 post recursion, e621_comment, patreon, patreon logo, patreon username, instagram username, text, dialogue";

/// Normalizes a space separated tag string (Danbooru, Gelbooru) into `tag_a, tag_b`.
pub fn normalize_tag_string(tags: &str) -> String {
    let list: Vec<&str> = tags.split_whitespace().collect();
    join_tags!(list)
}

/// Normalizes a list of tags (e621) into `tag_a, tag_b`.
pub fn normalize_tag_list<S: AsRef<str>>(tags: &[S]) -> String {
    let list: Vec<&str> = tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| !tag.is_empty())
        .collect();
    join_tags!(list)
}

/// Brings a tag into the form used for comparison: underscores instead of spaces and
/// unescaped parentheses.
pub fn normalize_tag_for_match(tag: &str) -> String {
    tag.trim()
        .replace(' ', "_")
        .replace("\\(", "(")
        .replace("\\)", ")")
}

/// A set of tags to remove from the output.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    tags: AHashSet<String>,
}

impl ExclusionList {
    /// Parses a comma separated list. Entries can use spaces or underscores and may have their
    /// parentheses escaped.
    pub fn parse(csv: &str) -> Self {
        let tags: AHashSet<String> = csv
            .split(',')
            .map(normalize_tag_for_match)
            .filter(|tag| !tag.is_empty())
            .collect();

        debug!("Exclusion list setup with {} tags", tags.len());
        Self { tags }
    }

    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(&normalize_tag_for_match(tag))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[inline]
pub fn parse_exclusion_list(csv: &str) -> ExclusionList {
    ExclusionList::parse(csv)
}

/// Removes every tag found in `list` from a `tag_a, tag_b` string.
///
/// Tokens are split on `", "` only, so tags that contain a comma survive untouched.
pub fn exclude_tags(tags: &str, list: &ExclusionList) -> String {
    let kept: Vec<&str> = tags
        .split(", ")
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && !list.contains(tag))
        .collect();
    join_tags!(kept)
}

/// Formats tags for prompt use: underscores become spaces and parentheses get escaped.
///
/// Parentheses that are already escaped are left alone, so formatting twice gives the same
/// result as formatting once.
pub fn format_tags(tags: &str) -> String {
    let mut out = String::with_capacity(tags.len() + 8);
    let mut prev = None;

    for c in tags.chars() {
        match c {
            '_' => out.push(' '),
            '(' | ')' if prev != Some('\\') => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        prev = Some(c);
    }

    out
}

/// Appends a comma to a non-empty tag string.
pub fn append_trailing_comma(tags: &mut String) {
    if !tags.is_empty() {
        tags.push(',');
    }
}

/// User selected tag post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct TagOptions {
    /// Remove underscores and escape parentheses.
    pub format_tags: bool,
    /// Append a comma to the last tag of each category.
    pub trailing_comma: bool,
    /// Remove the tags in `excluded_tags`.
    pub exclude_tags: bool,
    /// Comma separated list of tags to exclude.
    pub excluded_tags: String,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            format_tags: true,
            trailing_comma: false,
            exclude_tags: true,
            excluded_tags: String::from(DEFAULT_EXCLUDED_TAGS),
        }
    }
}

impl TagOptions {
    /// Leaves the tags exactly as the service returned them.
    pub fn raw() -> Self {
        Self {
            format_tags: false,
            trailing_comma: false,
            exclude_tags: false,
            excluded_tags: String::new(),
        }
    }

    /// Runs exclusion, formatting and the trailing comma, in this order, over every category.
    pub fn apply(&self, tags: &mut TagMap) {
        if self.exclude_tags {
            let list = parse_exclusion_list(&self.excluded_tags);
            if !list.is_empty() {
                for value in tags.values_mut() {
                    *value = exclude_tags(value, &list);
                }
            }
        }

        if self.format_tags {
            for value in tags.values_mut() {
                *value = format_tags(value);
            }
        }

        if self.trailing_comma {
            tags.values_mut().for_each(append_trailing_comma);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use btk_common::post::tags::TagCategory;

    #[test]
    fn string_and_list_normalize_identically() {
        let from_string = normalize_tag_string("1girl  solo\tlong_hair smile_(expression)");
        let from_list = normalize_tag_list(&["1girl", "solo", "long_hair", "smile_(expression)"]);

        assert_eq!(from_string, "1girl, solo, long_hair, smile_(expression)");
        assert_eq!(from_string, from_list);
        assert_eq!(normalize_tag_string(""), "");
        assert_eq!(normalize_tag_list::<String>(&[]), "");
    }

    #[test]
    fn exclusion_ignores_spaces_and_escapes() {
        let list = ExclusionList::parse("third-party edit, jacket \\(blue\\),,  ");
        assert_eq!(list.len(), 2);

        let out = exclude_tags("third-party_edit, solo, jacket_(blue)", &list);
        assert_eq!(out, "solo");
    }

    #[test]
    fn exclusion_keeps_tags_with_commas() {
        let mut plain = TagMap::new();
        plain.insert(TagCategory::General, normalize_tag_list(&["oh,_no", "solo"]));
        let mut excluded = plain.clone();

        TagOptions::raw().apply(&mut plain);
        TagOptions {
            exclude_tags: true,
            excluded_tags: String::from("text"),
            ..TagOptions::raw()
        }
        .apply(&mut excluded);

        assert_eq!(excluded[&TagCategory::General], "oh,_no, solo");
        assert_eq!(plain, excluded);

        let list = ExclusionList::parse("solo");
        assert_eq!(exclude_tags("oh,_no, solo", &list), "oh,_no");
    }

    #[test]
    fn exclusion_can_empty_a_category() {
        let list = ExclusionList::parse("cat");
        assert_eq!(exclude_tags("cat", &list), "");
    }

    #[test]
    fn formatting_escapes_parentheses() {
        assert_eq!(
            format_tags("long_hair, smile_(expression)"),
            "long hair, smile \\(expression\\)"
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_tags("cyrene_(honkai:_star_rail), 1girl");
        let twice = format_tags(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn trailing_comma_skips_empty() {
        let mut full = String::from("cat, dog");
        let mut empty = String::new();
        append_trailing_comma(&mut full);
        append_trailing_comma(&mut empty);

        assert_eq!(full, "cat, dog,");
        assert_eq!(empty, "");
    }

    #[test]
    fn options_apply_in_order() {
        let mut tags = TagMap::new();
        tags.insert(TagCategory::General, String::from("cat, dog_food"));
        tags.insert(TagCategory::Artist, String::from("cat"));

        let options = TagOptions {
            format_tags: true,
            trailing_comma: true,
            exclude_tags: true,
            excluded_tags: String::from("cat"),
        };
        options.apply(&mut tags);

        assert_eq!(tags[&TagCategory::General], "dog food,");
        assert_eq!(tags[&TagCategory::Artist], "");
    }

    #[test]
    fn exclusion_matches_raw_tags_before_formatting() {
        let mut tags = TagMap::new();
        tags.insert(TagCategory::Meta, String::from("third-party_edit, highres"));

        let options = TagOptions {
            excluded_tags: String::from("third-party edit"),
            ..TagOptions::default()
        };
        options.apply(&mut tags);

        assert_eq!(tags[&TagCategory::Meta], "highres");
    }

    #[test]
    fn raw_options_change_nothing() {
        let mut tags = TagMap::new();
        tags.insert(TagCategory::General, String::from("text, long_hair"));

        TagOptions::raw().apply(&mut tags);
        assert_eq!(tags[&TagCategory::General], "text, long_hair");
    }
}
