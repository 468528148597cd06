use booru_common::serde::{self, Deserialize, Serialize};

/// Response of `counts/posts.json`
#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct DanbooruCount {
    pub counts: DanbooruCounts,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct DanbooruCounts {
    pub posts: Option<u64>,
}
