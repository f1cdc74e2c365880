use btk_common::{
    serde::{self, de::Error, Deserialize, Deserializer, Serialize},
    serde_json::Value,
};

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct GelbooruPost {
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub width: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub height: u64,
    /// Every tag of the post, space separated. Gelbooru has no categories in its API.
    pub tags: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub preview_url: Option<String>,
}

/// Dimensions come as numbers or numeric strings depending on the Gelbooru version.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    match value {
        Some(Value::Number(n)) => Ok(n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0)),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid dimension: {s}"))),
        _ => Ok(0),
    }
}
