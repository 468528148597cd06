//! Post extractor for `https://danbooru.donmai.us`
//!
//! The danbooru extractor has the following features:
//! - Authentication (HTTP basic auth with the user's API key)
//! - Post counting, used to walk every result page
//! - Duplicate suppression clause
//!
use self::models::DanbooruCount;
use crate::auth::Credentials;
use crate::error::ExtractorError;
use crate::extractor::caps::ExtractorFeatures;
use crate::extractor::{BackendAdapter, SearchResults};
use crate::extractor_config::ServerConfig;
use async_trait::async_trait;
use booru_common::log::debug;
use booru_common::post::RawPost;
use booru_common::reqwest::{Client, RequestBuilder};
use booru_common::{client, serde_json, Booru};
use tokio::time::Instant;

mod models;

/// Main object to search posts on Danbooru
#[derive(Debug, Clone)]
pub struct DanbooruExtractor {
    client: Client,
    config: ServerConfig,
    auth: Credentials,
}

impl DanbooruExtractor {
    pub fn new(config: ServerConfig, auth: Credentials) -> Result<Self, ExtractorError> {
        if config.server != Booru::Danbooru {
            return Err(ExtractorError::InvalidImageboard {
                imgboard: config.server.to_string(),
            });
        }

        // Use common client for all connections with a set User-Agent
        let client = client!(config)?;

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let req = self.client.get(url);
        if self.auth.state().is_auth() {
            debug!("[AUTH] GET {}", url);
            req.basic_auth(&self.auth.username, Some(&self.auth.api_key))
        } else {
            debug!("GET {}", url);
            req
        }
    }

    /// Asks the count endpoint how many posts match `tags`.
    pub async fn count_posts(&self, tags: &str) -> Result<u64, ExtractorError> {
        let Some(count_endpoint) = &self.config.post_count_url else {
            return Err(ExtractorError::MissingCountEndpoint {
                imgboard: self.config.name.clone(),
            });
        };

        let body = self
            .get(count_endpoint)
            .query(&[("tags", tags)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let count: DanbooruCount = serde_json::from_str(&body)?;

        count
            .counts
            .posts
            .ok_or(ExtractorError::InvalidServerResponse)
    }

    /// Fetches one list of posts. Without a `page` the request is left unpaged.
    pub async fn get_post_list(
        &self,
        tags: &str,
        page: Option<u64>,
    ) -> Result<Vec<RawPost>, ExtractorError> {
        let limit = self.config.max_post_limit.to_string();

        let mut req = self
            .get(&self.config.post_list_url)
            .query(&[("limit", limit.as_str()), ("tags", tags)]);

        if let Some(page) = page {
            debug!("Fetching posts from page {}", page);
            req = req.query(&[("page", page)]);
        }

        let body = req.send().await?.error_for_status()?.text().await?;

        let start_point = Instant::now();
        let posts: Vec<RawPost> = serde_json::from_str(&body)?;
        debug!("List size: {}", posts.len());
        debug!("Post decoding took {:?}", start_point.elapsed());

        Ok(posts)
    }

    /// Number of pages needed to cover `total` posts.
    #[inline]
    #[must_use]
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.config.max_post_limit.max(1)))
    }
}

#[async_trait]
impl BackendAdapter for DanbooruExtractor {
    fn imageboard(&self) -> Booru {
        Booru::Danbooru
    }

    fn features(&self) -> ExtractorFeatures {
        ExtractorFeatures::Auth | ExtractorFeatures::DuplicateFilter
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ExtractorError> {
        let tags = self.search_tags(query);

        let total = self.count_posts(&tags).await?;
        let pages = self.page_count(total);
        debug!("Danbooru reports {} posts in {} pages", total, pages);

        if pages <= 1 {
            return Ok(SearchResults::new(self.get_post_list(&tags, None).await?));
        }

        // The count comes from the server, so nothing is reserved up front
        let mut fvec = Vec::new();

        for page in 1..=pages {
            fvec.extend(self.get_post_list(&tags, Some(page)).await?);
        }

        Ok(SearchResults::new(fvec))
    }
}

#[cfg(test)]
mod test {
    use booru_common::serde_json::{json, Value};
    use booru_common::Booru;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::DanbooruExtractor;
    use crate::auth::Credentials;
    use crate::extractor::BackendAdapter;
    use crate::extractor_config::ServerConfig;

    const TAGS: &str = "1girl -pixel-perfect-duplicate -duplicate";

    fn page_of(first_id: u64, len: u64) -> Value {
        let posts: Vec<Value> = (first_id..first_id + len)
            .map(|id| {
                json!({
                    "id": id,
                    "file_url": format!("https://cdn.donmai.us/original/{id}.jpg"),
                    "tag_string": "1girl solo",
                    "rating": "g",
                })
            })
            .collect();
        Value::Array(posts)
    }

    async fn extractor(server: &MockServer) -> DanbooruExtractor {
        let config = ServerConfig::with_base_url(Booru::Danbooru, &server.uri());
        DanbooruExtractor::new(config, Credentials::default()).unwrap()
    }

    #[tokio::test]
    async fn walks_every_page_in_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/counts/posts.json"))
            .and(query_param("tags", TAGS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"counts": {"posts": 250}})))
            .expect(1)
            .mount(&server)
            .await;

        for (page, first_id, len) in [("1", 0, 100), ("2", 100, 100), ("3", 200, 50)] {
            Mock::given(method("GET"))
                .and(path("/posts.json"))
                .and(query_param("page", page))
                .and(query_param("limit", "100"))
                .and(query_param("tags", TAGS))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_of(first_id, len)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let results = extractor(&server).await.search("1girl").await.unwrap();
        assert_eq!(results.total(), 250);

        let ids: Vec<u64> = results
            .map(|post| post["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, (0..250).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn single_page_is_requested_unpaged() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/counts/posts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"counts": {"posts": 3}})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .and(query_param_is_missing("page"))
            .and(query_param("tags", TAGS))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_of(10, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let results = extractor(&server).await.search("1girl").await.unwrap();
        assert_eq!(results.total(), 3);
        assert_eq!(results.count(), 3);
    }

    #[tokio::test]
    async fn failed_count_aborts_search() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/counts/posts.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_of(0, 1)))
            .expect(0)
            .mount(&server)
            .await;

        assert!(extractor(&server).await.search("1girl").await.is_err());
    }

    #[tokio::test]
    async fn null_count_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/counts/posts.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"counts": {"posts": null}})),
            )
            .mount(&server)
            .await;

        let err = extractor(&server).await.search("1girl").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExtractorError::InvalidServerResponse
        ));
    }

    #[tokio::test]
    async fn absurd_count_fails_on_first_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/counts/posts.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"counts": {"posts": 400_000_000_000_000_000_u64}})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = extractor(&server).await.search("1girl").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExtractorError::ConnectionError(_)
        ));
    }

    #[test]
    fn page_math() {
        let ext = DanbooruExtractor::new(ServerConfig::new(Booru::Danbooru), Credentials::default())
            .unwrap();
        assert_eq!(ext.page_count(0), 0);
        assert_eq!(ext.page_count(100), 1);
        assert_eq!(ext.page_count(101), 2);
        assert_eq!(ext.page_count(250), 3);
    }

    #[test]
    fn rejects_foreign_server() {
        assert!(DanbooruExtractor::new(
            ServerConfig::new(Booru::Gelbooru),
            Credentials::default()
        )
        .is_err());
    }
}
