//! # Tag Categories
//!
//! Imageboards group the tags of a post into buckets (artist, character, species...). Each
//! service exposes a different subset of them, so [`TagCategory`] is the union of every bucket
//! a handler can fill.
//!
//! Gelbooru doesn't split its tags at all, so everything it returns lands in [`TagCategory::All`].

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A named bucket of tags.
///
/// The declaration order is also the iteration order of every tag map in the toolkit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    /// General descriptive tags about the content, scene, or attributes.
    General,
    /// Tags identifying specific characters depicted.
    Character,
    /// Tags related to copyright, series, or franchise.
    Copyright,
    /// Tags identifying the artist(s) of the work. e6ai calls them `director`.
    Artist,
    /// Tags identifying the species of characters, only used on e621/e926/e6ai.
    Species,
    /// Meta-tags related to the post itself (e.g., "high_resolution", "tagme").
    Meta,
    /// e621 contributor tags.
    Contributor,
    /// Generation model tags, only used on AIBooru.
    Model,
    /// Every tag of the post merged together, for services without categories.
    All,
}

impl TagCategory {
    pub const ALL: [Self; 9] = [
        Self::General,
        Self::Character,
        Self::Copyright,
        Self::Artist,
        Self::Species,
        Self::Meta,
        Self::Contributor,
        Self::Model,
        Self::All,
    ];

    /// Lower-case name of the category, e.g. `general`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Character => "character",
            Self::Copyright => "copyright",
            Self::Artist => "artist",
            Self::Species => "species",
            Self::Meta => "meta",
            Self::Contributor => "contributor",
            Self::Model => "model",
            Self::All => "all",
        }
    }

    /// Name of the output field carrying this category, e.g. `GENERAL_TAGS`.
    #[inline]
    pub const fn output_name(self) -> &'static str {
        match self {
            Self::General => "GENERAL_TAGS",
            Self::Character => "CHARACTER_TAGS",
            Self::Copyright => "COPYRIGHT_TAGS",
            Self::Artist => "ARTIST_TAGS",
            Self::Species => "SPECIES_TAGS",
            Self::Meta => "META_TAGS",
            Self::Contributor => "CONTRIBUTOR_TAGS",
            Self::Model => "MODEL_TAGS",
            Self::All => "ALL_TAGS",
        }
    }
}

impl Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TagCategory {
    type Err = String;

    /// Accepts both the plain name (`general`) and the output field name (`GENERAL_TAGS`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_suffix("_tags").unwrap_or(&lower);

        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str() == name)
            .ok_or_else(|| format!("Unknown tag category: {s}"))
    }
}

#[cfg(test)]
mod test {
    use super::TagCategory;

    #[test]
    fn parses_plain_and_output_names() {
        assert_eq!("general".parse(), Ok(TagCategory::General));
        assert_eq!("SPECIES_TAGS".parse(), Ok(TagCategory::Species));
        assert_eq!("All_Tags".parse(), Ok(TagCategory::All));
        assert!("lore".parse::<TagCategory>().is_err());
    }

    #[test]
    fn output_name_round_trips() {
        for cat in TagCategory::ALL {
            assert_eq!(cat.output_name().parse::<TagCategory>(), Ok(cat));
        }
    }
}
