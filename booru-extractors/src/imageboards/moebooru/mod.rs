//! Post extractor for `https://yande.re`, `https://konachan.com` and other Moebooru imageboards
//!
//! Moebooru is searched with a single page of up to 100 posts. No further pages are requested.
use crate::auth::Credentials;
use crate::error::ExtractorError;
use crate::extractor::caps::ExtractorFeatures;
use crate::extractor::{BackendAdapter, SearchResults};
use crate::extractor_config::ServerConfig;
use async_trait::async_trait;
use booru_common::log::debug;
use booru_common::post::RawPost;
use booru_common::reqwest::Client;
use booru_common::{client, serde_json, Booru};

#[derive(Debug, Clone)]
pub struct MoebooruExtractor {
    client: Client,
    config: ServerConfig,
    auth: Credentials,
}

impl MoebooruExtractor {
    /// Only accepts servers speaking the Moebooru API.
    pub fn new(config: ServerConfig, auth: Credentials) -> Result<Self, ExtractorError> {
        if !matches!(config.server, Booru::Yandere | Booru::Konachan) {
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
}

#[async_trait]
impl BackendAdapter for MoebooruExtractor {
    fn imageboard(&self) -> Booru {
        self.config.server
    }

    fn features(&self) -> ExtractorFeatures {
        ExtractorFeatures::Auth | ExtractorFeatures::DuplicateFilter
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ExtractorError> {
        let tags = self.search_tags(query);
        let limit = self.config.max_post_limit.to_string();

        let mut req = self
            .client
            .get(&self.config.post_list_url)
            .query(&[("limit", limit.as_str()), ("tags", tags.as_str())]);

        if self.auth.state().is_auth() {
            debug!("[AUTH] Searching {} for '{}'", self.config.pretty_name, tags);
            req = req.query(&[
                ("login", self.auth.username.as_str()),
                ("password_hash", self.auth.api_key.as_str()),
            ]);
        } else {
            debug!("Searching {} for '{}'", self.config.pretty_name, tags);
        }

        let body = req.send().await?.error_for_status()?.text().await?;

        let posts: Vec<RawPost> = serde_json::from_str(&body)?;
        debug!("List size: {}", posts.len());

        Ok(SearchResults::new(posts))
    }
}
