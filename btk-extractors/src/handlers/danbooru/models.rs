use btk_common::serde::{self, Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct DanbooruPost {
    pub id: Option<u64>,
    pub file_url: Option<String>,
    pub image_width: Option<u64>,
    pub image_height: Option<u64>,
    pub tag_string_general: Option<String>,
    pub tag_string_character: Option<String>,
    pub tag_string_copyright: Option<String>,
    pub tag_string_artist: Option<String>,
    pub tag_string_meta: Option<String>,
    /// Only present on AIBooru.
    pub tag_string_model: Option<String>,
    pub media_asset: Option<MediaAsset>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct MediaAsset {
    #[serde(default)]
    pub variants: Vec<MediaVariant>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct MediaVariant {
    #[serde(rename = "type")]
    pub variant_type: Option<String>,
    pub url: Option<String>,
}

impl DanbooruPost {
    /// URL of the media variant named `name`, if the post has one.
    pub fn variant_url(&self, name: &str) -> Option<&str> {
        self.media_asset
            .as_ref()?
            .variants
            .iter()
            .find(|v| v.variant_type.as_deref() == Some(name))
            .and_then(|v| v.url.as_deref())
    }
}
