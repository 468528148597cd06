//! Endpoint configuration for every supported imageboard.
//!
//! [`DEFAULT_SERVERS`] holds the public websites. A [`ServerConfig`] pointing somewhere else
//! (a mirror, or a local mock server) can be built with [`ServerConfig::with_base_url`].
use booru_common::serde::{self, Deserialize, Serialize};
use booru_common::Booru;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Display;

pub static DEFAULT_SERVERS: Lazy<HashMap<Booru, ServerConfig>> = Lazy::new(|| {
    let mut hmap = HashMap::with_capacity(Booru::ALL.len());
    for booru in Booru::ALL {
        hmap.insert(booru, ServerConfig::with_base_url(booru, booru.base_url()));
    }
    hmap
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct ServerConfig {
    pub name: String,
    pub pretty_name: String,
    pub server: Booru,
    pub user_agent: String,
    pub base_url: String,
    pub post_list_url: String,
    pub post_count_url: Option<String>,
    pub max_post_limit: u16,
}

impl ServerConfig {
    /// Returns the default configuration for `server`.
    #[must_use]
    pub fn new(server: Booru) -> Self {
        DEFAULT_SERVERS
            .get(&server)
            .cloned()
            .unwrap_or_else(|| Self::with_base_url(server, server.base_url()))
    }

    /// Derives every API endpoint of `server` from a custom base url.
    #[must_use]
    pub fn with_base_url(server: Booru, base_url: &str) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let (post_list_url, post_count_url) = match server {
            Booru::Danbooru => (
                format!("{base_url}/posts.json"),
                Some(format!("{base_url}/counts/posts.json")),
            ),
            Booru::Gelbooru => (
                format!("{base_url}/index.php?page=dapi&s=post&q=index&json=1"),
                None,
            ),
            Booru::Yandere | Booru::Konachan => (format!("{base_url}/post.json"), None),
        };

        Self {
            name: server.to_string(),
            pretty_name: server.pretty_name().to_string(),
            server,
            user_agent: server.user_agent(),
            base_url,
            post_list_url,
            post_count_url,
            max_post_limit: server.max_post_limit(),
        }
    }

    /// Needed by the [`client!`](booru_common::client) macro.
    #[inline]
    pub fn user_agent(&self) -> String {
        self.user_agent.clone()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Booru::Danbooru)
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
