//! Main representation of an imageboard post
//!
//! # Post
//! Posts arrive from every imageboard as a [`RawPost`], the JSON object exactly as the API
//! returned it. Once normalized they become a [`CanonicalPost`], a backend independent
//! representation ready to be handed to an uploader.
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use std::{cmp::Ordering, fmt::Debug};

use crate::Booru;

use self::rating::Safety;

pub mod error;
pub mod rating;

/// A post record exactly as a backend returned it.
pub type RawPost = serde_json::Map<String, serde_json::Value>;

/// Catchall model for the parts of an imageboard post needed to download and re-upload it.
#[derive(Clone, Serialize, Deserialize, Eq)]
pub struct CanonicalPost {
    /// ID number of the post given by the imageboard
    pub id: u64,
    /// The imageboard where this post was extracted from
    pub website: Booru,
    /// Direct URL of the original image file located inside the imageboard's server
    pub file_url: String,
    /// Public page of the post, derived from the imageboard and the post ID.
    pub source_url: String,
    /// Normalized rating of the post.
    pub safety: Safety,
    /// Set of tags associated with the post.
    pub tags: AHashSet<String>,
}

impl Debug for CanonicalPost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanonicalPost")
            .field("Post ID", &self.id)
            .field("Website", &self.website)
            .field("Download URL", &self.file_url)
            .field("Source", &self.source_url)
            .field("Safety", &self.safety)
            .field("Tag Count", &self.tags.len())
            .finish()
    }
}

impl Ord for CanonicalPost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.website
            .cmp(&other.website)
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for CanonicalPost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CanonicalPost {
    fn eq(&self, other: &Self) -> bool {
        self.website == other.website && self.id == other.id
    }
}

impl CanonicalPost {
    /// Returns the tags in a stable, alphabetical order.
    #[inline]
    pub fn sorted_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.tags.iter().cloned().collect();
        tags.sort_unstable();
        tags
    }
}
