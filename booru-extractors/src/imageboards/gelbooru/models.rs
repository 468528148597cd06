use booru_common::serde::{self, Deserialize, Deserializer, Serialize};
use booru_common::serde_json::Value;

/// Records are kept untyped here so a single malformed post cannot reject the whole batch.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub struct GelbooruTopLevel {
    #[serde(default)]
    pub post: Vec<Value>,
}

/// A Gelbooru post, with its tags already split into a list.
#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct GelbooruPost {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "split_tags")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

pub fn split_tag_string(tags: &str) -> Vec<String> {
    tags.split_whitespace().map(str::to_string).collect()
}

fn split_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<String>::deserialize(deserializer)?;
    Ok(split_tag_string(&tags.unwrap_or_default()))
}
