//! Turns raw imageboard records into [`CanonicalPost`]s.
//!
//! Every imageboard names its fields differently. Instead of guessing the shape of a record at
//! runtime, each [`Booru`] has a fixed [`FieldTable`] saying where to look for every value.
use booru_common::ahash::AHashSet;
use booru_common::post::error::PostError;
use booru_common::post::rating::Safety;
use booru_common::post::{CanonicalPost, RawPost};
use booru_common::serde_json::Value;
use booru_common::Booru;

/// Where the tags of a post live and how they are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    /// A JSON array of tag strings.
    Collection(&'static str),
    /// A single string with tags separated by whitespace.
    Delimited(&'static str),
}

impl TagField {
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Collection(key) | Self::Delimited(key) => key,
        }
    }
}

/// Field names of a post record on a given imageboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTable {
    pub id: &'static str,
    pub file_url: &'static str,
    pub tags: TagField,
    pub rating: &'static str,
}

pub const DANBOORU_FIELDS: FieldTable = FieldTable {
    id: "id",
    file_url: "file_url",
    tags: TagField::Delimited("tag_string"),
    rating: "rating",
};

/// Gelbooru tags are split while decoding the API response.
pub const GELBOORU_FIELDS: FieldTable = FieldTable {
    id: "id",
    file_url: "file_url",
    tags: TagField::Collection("tags"),
    rating: "rating",
};

pub const MOEBOORU_FIELDS: FieldTable = FieldTable {
    id: "id",
    file_url: "file_url",
    tags: TagField::Delimited("tags"),
    rating: "rating",
};

#[inline]
#[must_use]
pub const fn field_table(booru: Booru) -> &'static FieldTable {
    match booru {
        Booru::Danbooru => &DANBOORU_FIELDS,
        Booru::Gelbooru => &GELBOORU_FIELDS,
        Booru::Yandere | Booru::Konachan => &MOEBOORU_FIELDS,
    }
}

/// Normalizes a single record coming from `booru`.
///
/// # Errors
/// * [`PostError::MissingField`] when the id, file url, tags or rating are absent. An empty
///   file url counts as absent.
/// * [`PostError::UnknownRating`] when the rating token is not recognized.
pub fn normalize(booru: Booru, raw: &RawPost) -> Result<CanonicalPost, PostError> {
    let table = field_table(booru);

    let id = read_id(raw, table.id).ok_or_else(|| PostError::missing(table.id))?;

    let file_url = raw
        .get(table.file_url)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| PostError::missing(table.file_url))?
        .to_string();

    let tags = read_tags(raw, table.tags).ok_or_else(|| PostError::missing(table.tags.key()))?;

    let rating = raw
        .get(table.rating)
        .and_then(Value::as_str)
        .ok_or_else(|| PostError::missing(table.rating))?;

    let safety = Safety::from_rating_str(rating)?;

    Ok(CanonicalPost {
        id,
        website: booru,
        file_url,
        source_url: booru.source_url(id),
        safety,
        tags,
    })
}

/// Some APIs send numeric ids as strings.
fn read_id(raw: &RawPost, key: &str) -> Option<u64> {
    match raw.get(key)? {
        Value::Number(num) => num.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn read_tags(raw: &RawPost, field: TagField) -> Option<AHashSet<String>> {
    let tags: AHashSet<String> = match field {
        TagField::Delimited(key) => raw
            .get(key)?
            .as_str()?
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        TagField::Collection(key) => raw
            .get(key)?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    };

    Some(tags)
}
