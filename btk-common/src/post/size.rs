//! Image size variants a caller can request for the post's image.
//!
//! Not every service offers every variant, so each handler resolves the request to the closest
//! one it has:
//! * Danbooru/AIBooru look the variant name up in `media_asset.variants`.
//! * e621 only has `original` (`file`), `sample` and `preview`.
//! * Gelbooru only has `original`, `sample` and `preview`.
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Label used by older front-ends for [`ImageSize::None`].
pub const LEGACY_NONE_LABEL: &str = "none - don't download image";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported image size: {value}. Expected one of none, 180x180, 360x360, 720x720, sample, original")]
pub struct InvalidImageSize {
    pub value: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSize {
    /// Don't download the image at all.
    #[serde(rename = "none")]
    None,
    #[serde(rename = "180x180")]
    Px180,
    #[serde(rename = "360x360")]
    Px360,
    #[serde(rename = "720x720")]
    Px720,
    #[default]
    #[serde(rename = "sample")]
    Sample,
    #[serde(rename = "original")]
    Original,
}

impl ImageSize {
    pub const VARIANTS: [Self; 6] = [
        Self::None,
        Self::Px180,
        Self::Px360,
        Self::Px720,
        Self::Sample,
        Self::Original,
    ];

    /// Variant name as used by Danbooru's `media_asset.variants[].type`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Px180 => "180x180",
            Self::Px360 => "360x360",
            Self::Px720 => "720x720",
            Self::Sample => "sample",
            Self::Original => "original",
        }
    }

    /// `false` only for [`ImageSize::None`].
    #[inline]
    pub const fn wants_image(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = InvalidImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if value == LEGACY_NONE_LABEL {
            return Ok(Self::None);
        }

        Self::VARIANTS
            .into_iter()
            .find(|v| v.as_str() == value)
            .ok_or_else(|| InvalidImageSize {
                value: s.to_string(),
            })
    }
}
