//! Ready-made combinations of a bound handler and the output fields that make sense for it.
use std::{fmt::Display, str::FromStr};

use btk_common::post::tags::TagCategory;
use btk_extractors::handlers::{
    aibooru::AIBooruHandler, danbooru::DanbooruHandler, e621::E621Handler,
    gelbooru::GelbooruHandler,
};

use crate::result::OutputField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputPreset {
    /// Any service, picked by the request. Outputs every category a service may have.
    #[default]
    Any,
    Danbooru,
    AIBooru,
    E621,
    Gelbooru,
}

impl OutputPreset {
    pub const VARIANTS: [Self; 5] = [
        Self::Any,
        Self::Danbooru,
        Self::AIBooru,
        Self::E621,
        Self::Gelbooru,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Danbooru => "danbooru",
            Self::AIBooru => "aibooru",
            Self::E621 => "e621",
            Self::Gelbooru => "gelbooru",
        }
    }

    /// Name of the handler this preset always uses, regardless of the post URL.
    pub const fn handler_name(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Danbooru => Some(DanbooruHandler::NAME),
            Self::AIBooru => Some(AIBooruHandler::NAME),
            Self::E621 => Some(E621Handler::NAME),
            Self::Gelbooru => Some(GelbooruHandler::NAME),
        }
    }

    /// Output fields of the preset, in display order.
    pub fn fields(self) -> Vec<OutputField> {
        use TagCategory::*;

        let categories: &[TagCategory] = match self {
            Self::Any => &[
                General,
                Character,
                Contributor,
                Copyright,
                Artist,
                Species,
                Meta,
                Model,
            ],
            Self::Danbooru => &[General, Character, Copyright, Artist, Meta],
            Self::AIBooru => &[General, Character, Copyright, Artist, Meta, Model],
            Self::E621 => &[
                General,
                Character,
                Contributor,
                Copyright,
                Artist,
                Species,
                Meta,
            ],
            Self::Gelbooru => &[All],
        };

        let mut fields = Vec::with_capacity(categories.len() + 3);
        fields.push(OutputField::Image);
        fields.extend(categories.iter().copied().map(OutputField::Tags));
        fields.push(OutputField::OriginalWidth);
        fields.push(OutputField::OriginalHeight);
        fields
    }
}

impl Display for OutputPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::VARIANTS
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| format!("Unknown preset: {s}"))
    }
}
