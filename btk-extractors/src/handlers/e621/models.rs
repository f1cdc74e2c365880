use btk_common::serde::{self, Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct E621TopLevel {
    pub post: Option<E621Post>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct E621Post {
    pub id: Option<u64>,
    pub file: Option<E621File>,
    pub sample: Option<E621File>,
    pub preview: Option<E621File>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct E621File {
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct Tags {
    pub general: Option<Vec<String>>,
    pub species: Option<Vec<String>>,
    pub character: Option<Vec<String>>,
    pub copyright: Option<Vec<String>>,
    pub artist: Option<Vec<String>>,
    /// e6ai's name for the artist category.
    pub director: Option<Vec<String>>,
    pub contributor: Option<Vec<String>>,
    pub meta: Option<Vec<String>>,
}

impl Tags {
    /// Artist tags, or the director tags when the post has no artist.
    pub fn artist_or_director(&self) -> Option<&Vec<String>> {
        self.artist
            .as_ref()
            .filter(|a| !a.is_empty())
            .or(self.director.as_ref())
    }
}

impl E621Post {
    #[inline]
    pub fn file_url(&self) -> Option<&str> {
        self.file.as_ref().and_then(|f| f.url.as_deref())
    }
}
