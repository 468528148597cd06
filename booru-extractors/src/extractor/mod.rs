//! Common interface exposed by every imageboard extractor.
//!
//! All modules implementing [`BackendAdapter`] connect to an imageboard website, search for
//! posts matching a query and return them untouched as [`RawPost`]s, together with their total.
use async_trait::async_trait;
use booru_common::{log::debug, post::RawPost, Booru};

use crate::error::ExtractorError;

use self::caps::ExtractorFeatures;

pub mod caps;

/// Tags appended to a query to leave out posts the imageboard already flags as duplicates.
pub const DUPLICATE_EXCLUSION_CLAUSE: &str = " -pixel-perfect-duplicate -duplicate";

/// This trait is the only interface the import pipeline needs from an imageboard.
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    /// Returns the [`Booru`] variant for this extractor
    fn imageboard(&self) -> Booru;

    /// Expose some bitflags to indicate how this extractor talks to its imageboard
    fn features(&self) -> ExtractorFeatures;

    /// Runs the whole search for `query`.
    ///
    /// Every request is completed before this returns, so the total is always known before
    /// the first post is consumed.
    async fn search(&self, query: &str) -> Result<SearchResults, ExtractorError>;

    /// The query string actually sent to the imageboard.
    fn search_tags(&self, query: &str) -> String {
        let tags = if self.features().contains(ExtractorFeatures::DuplicateFilter) {
            format!("{query}{DUPLICATE_EXCLUSION_CLAUSE}")
        } else {
            query.to_string()
        };
        debug!("Search tags for {}: {}", self.imageboard(), tags);
        tags
    }
}

/// The outcome of a search: how many posts were found and the posts themselves.
///
/// Iterating consumes the results, so they can only be walked once, front to back.
#[derive(Debug)]
pub struct SearchResults {
    total: u64,
    posts: std::vec::IntoIter<RawPost>,
}

impl SearchResults {
    #[must_use]
    pub fn new(posts: Vec<RawPost>) -> Self {
        Self {
            total: posts.len() as u64,
            posts: posts.into_iter(),
        }
    }

    /// Number of posts this search yields.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

impl Iterator for SearchResults {
    type Item = RawPost;

    fn next(&mut self) -> Option<Self::Item> {
        self.posts.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.posts.size_hint()
    }
}

impl ExactSizeIterator for SearchResults {}
