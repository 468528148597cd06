//! The import loop.
//!
//! # Flow
//! For every imageboard picked by [`dispatch`], in order:
//! 1. Build its extractor and run the search. A failure here is logged and the run moves on to
//!    the next imageboard.
//! 2. For every post found, normalize it, download the media and hand the file to the
//!    [`Uploader`]. A failure in any step skips that post only.
//!
//! Everything is awaited sequentially: one imageboard at a time, one post at a time.
use std::sync::Arc;

use booru_common::ahash::AHashMap;
use booru_common::log::{debug, error, info, warn};
use booru_common::post::RawPost;
use booru_common::serde_json::Value;
use booru_common::{Booru, BooruSelector};
use booru_extractors::auth::Credentials;
use booru_extractors::error::ExtractorError;
use booru_extractors::extractor::SearchResults;
use booru_extractors::extractor_config::ServerConfig;
use booru_extractors::imageboards::build_adapter;
use booru_extractors::normalizer::normalize;

use crate::dispatch::dispatch;
use crate::error::ImportError;
use crate::fetcher::MediaFetcher;
use crate::progress::{no_op_progress_listener, SharedProgressListener};
use crate::upload::{UploadMetadata, Uploader};

pub use self::summary::{BackendReport, ImportOutcome, ImportSummary};

mod summary;

pub struct Importer {
    servers: AHashMap<Booru, ServerConfig>,
    credentials: AHashMap<Booru, Credentials>,
    fetcher: MediaFetcher,
    uploader: Arc<dyn Uploader>,
    progress: SharedProgressListener,
}

impl Importer {
    /// Sets up an importer talking to the default servers, anonymously and without progress
    /// reporting.
    pub fn new(fetcher: MediaFetcher, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            servers: AHashMap::new(),
            credentials: AHashMap::new(),
            fetcher,
            uploader,
            progress: no_op_progress_listener(),
        }
    }

    /// Replaces the server used for `config.server`.
    #[must_use]
    pub fn with_server(mut self, config: ServerConfig) -> Self {
        self.servers.insert(config.server, config);
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, booru: Booru, auth: Credentials) -> Self {
        self.credentials.insert(booru, auth);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, listener: SharedProgressListener) -> Self {
        self.progress = listener;
        self
    }

    fn server_for(&self, booru: Booru) -> ServerConfig {
        self.servers
            .get(&booru)
            .cloned()
            .unwrap_or_else(|| ServerConfig::new(booru))
    }

    /// Imports every post matching `query` from the selected imageboards.
    ///
    /// Never fails as a whole. Failed searches and skipped posts are recorded in the summary.
    pub async fn run(&self, selector: BooruSelector, query: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for booru in dispatch(selector) {
            summary.reports.push(self.import_backend(booru, query).await);
        }

        info!("Import finished: {summary}");
        summary
    }

    async fn import_backend(&self, booru: Booru, query: &str) -> BackendReport {
        let results = match self.search(booru, query).await {
            Ok(results) => results,
            Err(err) => {
                error!("Failed to search {}: {}", booru.pretty_name(), err);
                return BackendReport::failed(booru, err.to_string());
            }
        };

        let total = results.total();
        info!("Found {} posts on {}", total, booru.pretty_name());

        let mut report = BackendReport::new(booru, total);
        self.progress.begin_batch(booru, total);

        for raw in results {
            let outcome = match self.import_post(booru, &raw).await {
                Ok(()) => ImportOutcome::Imported,
                Err(err) => {
                    warn!(
                        "Skipped {} post {}: {}",
                        booru.pretty_name(),
                        post_label(&raw),
                        err
                    );
                    ImportOutcome::Skipped(err)
                }
            };
            report.outcomes.push(outcome);
            self.progress.main_tick();
        }

        self.progress.main_done();
        report
    }

    async fn search(&self, booru: Booru, query: &str) -> Result<SearchResults, ExtractorError> {
        let auth = self.credentials.get(&booru).cloned().unwrap_or_default();
        let adapter = build_adapter(self.server_for(booru), auth)?;
        adapter.search(query).await
    }

    async fn import_post(&self, booru: Booru, raw: &RawPost) -> Result<(), ImportError> {
        let post = normalize(booru, raw)?;
        debug!("{:?}", post);

        let file = self.fetcher.fetch(&post.file_url).await?;
        let meta = UploadMetadata::from(&post);

        self.uploader.upload(&file, &meta).await?;
        Ok(())
    }
}

fn post_label(raw: &RawPost) -> String {
    match raw.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(id) => id.to_string(),
        None => String::from("<no id>"),
    }
}
