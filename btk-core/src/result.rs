//! The assembled output of a post fetch.
use std::{convert::Infallible, fmt::Display, str::FromStr};

use btk_common::{
    log::warn,
    post::{tags::TagCategory, TagMap},
    serde::{self, Serialize},
};
use image::DynamicImage;

/// Where [`FetchResult::image`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(crate = "self::serde", tag = "kind", rename_all = "lowercase")]
pub enum ImageSource {
    Downloaded { url: String },
    /// A blank image stands in for the post image.
    Placeholder { reason: String },
}

impl ImageSource {
    #[inline]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Name of the handler that served the post.
    pub handler: &'static str,
    pub image: DynamicImage,
    pub image_source: ImageSource,
    /// Processed tags. Categories the post has no tags for are absent.
    pub tags: TagMap,
    pub width: u64,
    pub height: u64,
}

impl FetchResult {
    /// Tags of a category, or `""`.
    #[inline]
    pub fn tags_for(&self, category: TagCategory) -> &str {
        self.tags.get(&category).map_or("", String::as_str)
    }

    /// Values for each of `fields`, in the same order.
    pub fn outputs(&self, fields: &[OutputField]) -> Vec<OutputValue<'_>> {
        fields.iter().map(|field| self.output(field)).collect()
    }

    pub fn output(&self, field: &OutputField) -> OutputValue<'_> {
        match field {
            OutputField::Image => OutputValue::Image(&self.image),
            OutputField::OriginalWidth => OutputValue::Int(self.width),
            OutputField::OriginalHeight => OutputValue::Int(self.height),
            OutputField::Tags(category) => OutputValue::Text(self.tags_for(*category)),
            OutputField::Unknown(name) => {
                warn!("Unknown output field {name}, returning an empty string");
                OutputValue::Text("")
            }
        }
    }
}

/// A named slot of the fetch output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputField {
    Image,
    OriginalWidth,
    OriginalHeight,
    Tags(TagCategory),
    Unknown(String),
}

impl OutputField {
    pub fn name(&self) -> &str {
        match self {
            Self::Image => "IMAGE",
            Self::OriginalWidth => "ORIGINAL_WIDTH",
            Self::OriginalHeight => "ORIGINAL_HEIGHT",
            Self::Tags(category) => category.output_name(),
            Self::Unknown(name) => name,
        }
    }
}

impl FromStr for OutputField {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let field = match name.to_ascii_uppercase().as_str() {
            "IMAGE" => Self::Image,
            "ORIGINAL_WIDTH" => Self::OriginalWidth,
            "ORIGINAL_HEIGHT" => Self::OriginalHeight,
            upper => match upper
                .strip_suffix("_TAGS")
                .and_then(|c| c.parse::<TagCategory>().ok())
            {
                Some(category) => Self::Tags(category),
                None => Self::Unknown(name.to_string()),
            },
        };
        Ok(field)
    }
}

impl Display for OutputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputValue<'a> {
    Image(&'a DynamicImage),
    Int(u64),
    Text(&'a str),
}

#[cfg(test)]
mod test {
    use btk_common::post::{tags::TagCategory, TagMap};
    use image::DynamicImage;

    use super::{FetchResult, ImageSource, OutputField, OutputValue};

    fn sample_result() -> FetchResult {
        let mut tags = TagMap::new();
        tags.insert(TagCategory::General, String::from("cat, dog"));

        FetchResult {
            handler: "Danbooru",
            image: DynamicImage::new_rgb8(4, 4),
            image_source: ImageSource::Placeholder {
                reason: String::from("test"),
            },
            tags,
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("IMAGE".parse::<OutputField>().unwrap(), OutputField::Image);
        assert_eq!(
            "original_width".parse::<OutputField>().unwrap(),
            OutputField::OriginalWidth
        );
        assert_eq!(
            "MODEL_TAGS".parse::<OutputField>().unwrap(),
            OutputField::Tags(TagCategory::Model)
        );
        assert_eq!(
            "ALL_TAGS".parse::<OutputField>().unwrap(),
            OutputField::Tags(TagCategory::All)
        );
        assert_eq!(
            "RATING".parse::<OutputField>().unwrap(),
            OutputField::Unknown(String::from("RATING"))
        );
    }

    #[test]
    fn maps_fields_to_values() {
        let result = sample_result();
        let fields: Vec<OutputField> = [
            "GENERAL_TAGS",
            "ARTIST_TAGS",
            "ORIGINAL_WIDTH",
            "ORIGINAL_HEIGHT",
            "SCORE",
        ]
        .iter()
        .map(|f| f.parse().unwrap())
        .collect();

        let values = result.outputs(&fields);
        assert_eq!(
            values,
            vec![
                OutputValue::Text("cat, dog"),
                OutputValue::Text(""),
                OutputValue::Int(800),
                OutputValue::Int(600),
                OutputValue::Text(""),
            ]
        );
    }

    #[test]
    fn image_field_points_to_result_image() {
        let result = sample_result();
        match result.output(&OutputField::Image) {
            OutputValue::Image(img) => assert_eq!(img.width(), 4),
            other => panic!("unexpected value {other:?}"),
        }
    }
}
