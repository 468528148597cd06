//! Hand-off point between the import pipeline and whatever stores the imported media.
use std::io;
use std::path::Path;

use async_trait::async_trait;
use booru_common::post::rating::Safety;
use booru_common::post::CanonicalPost;
use booru_common::serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata attached to every uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "booru_common::serde")]
pub struct UploadMetadata {
    /// Alphabetically sorted.
    pub tags: Vec<String>,
    pub safety: Safety,
    pub source: String,
}

impl From<&CanonicalPost> for UploadMetadata {
    fn from(post: &CanonicalPost) -> Self {
        Self {
            tags: post.sorted_tags(),
            safety: post.safety,
            source: post.source_url.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload metadata is missing {field}")]
    MissingField { field: String },

    #[error("Upload was rejected: {message}")]
    Failed { message: String },

    #[error("Failed to access file: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Receives a downloaded file together with its metadata.
///
/// After a call the uploader owns `file`; the pipeline never touches it again.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, file: &Path, meta: &UploadMetadata) -> Result<(), UploadError>;
}
