//! Post extractor for `https://gelbooru.com`
//!
//! Gelbooru is searched with a single request whose result is taken as the whole set of
//! posts. The request is awaited to completion before anything is handed back.
//!
//! The duplicate suppression clause is not appended for this imageboard.
use self::models::{split_tag_string, GelbooruPost, GelbooruTopLevel};
use crate::auth::Credentials;
use crate::error::ExtractorError;
use crate::extractor::caps::ExtractorFeatures;
use crate::extractor::{BackendAdapter, SearchResults};
use crate::extractor_config::ServerConfig;
use async_trait::async_trait;
use booru_common::log::debug;
use booru_common::post::RawPost;
use booru_common::reqwest::Client;
use booru_common::serde::Deserialize;
use booru_common::serde_json::{self, Value};
use booru_common::{client, Booru};

mod models;

#[derive(Debug, Clone)]
pub struct GelbooruExtractor {
    client: Client,
    config: ServerConfig,
    auth: Credentials,
}

impl GelbooruExtractor {
    pub fn new(config: ServerConfig, auth: Credentials) -> Result<Self, ExtractorError> {
        if config.server != Booru::Gelbooru {
            return Err(ExtractorError::InvalidImageboard {
                imgboard: config.server.to_string(),
            });
        }

        let client = client!(config)?;

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// Decodes a Gelbooru API response into raw posts with pre-split tag lists.
    ///
    /// Only a malformed envelope fails the search. Records that do not fit the post model are
    /// passed on as they came, so they get skipped one by one when normalized.
    pub fn map_posts(&self, raw_json: &str) -> Result<Vec<RawPost>, ExtractorError> {
        let top_level: GelbooruTopLevel = serde_json::from_str(raw_json)?;

        Ok(top_level.post.into_iter().map(map_post).collect())
    }
}

fn map_post(value: Value) -> RawPost {
    let decoded = GelbooruPost::deserialize(&value).map(serde_json::to_value);

    match (decoded, value) {
        (Ok(Ok(Value::Object(map))), _) => map,
        (Err(err), Value::Object(mut map)) => {
            debug!("Keeping undecodable Gelbooru post as is: {}", err);
            let split = map.get("tags").and_then(Value::as_str).map(split_tag_string);
            if let Some(tags) = split {
                map.insert(String::from("tags"), Value::from(tags));
            }
            map
        }
        (_, Value::Object(map)) => map,
        _ => RawPost::new(),
    }
}

#[async_trait]
impl BackendAdapter for GelbooruExtractor {
    fn imageboard(&self) -> Booru {
        Booru::Gelbooru
    }

    fn features(&self) -> ExtractorFeatures {
        ExtractorFeatures::Auth
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ExtractorError> {
        let tags = self.search_tags(query);
        let limit = self.config.max_post_limit.to_string();

        let mut req = self
            .client
            .get(&self.config.post_list_url)
            .query(&[("limit", limit.as_str()), ("tags", tags.as_str())]);

        if self.auth.state().is_auth() {
            debug!("[AUTH] Searching Gelbooru for '{}'", tags);
            req = req.query(&[
                ("user_id", self.auth.username.as_str()),
                ("api_key", self.auth.api_key.as_str()),
            ]);
        } else {
            debug!("Searching Gelbooru for '{}'", tags);
        }

        let body = req.send().await?.error_for_status()?.text().await?;

        Ok(SearchResults::new(self.map_posts(&body)?))
    }
}
