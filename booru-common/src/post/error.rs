use thiserror::Error;

use super::rating::UnknownRatingError;

/// Reasons a backend record could not be turned into a [`CanonicalPost`](super::CanonicalPost).
#[derive(Error, Debug)]
pub enum PostError {
    /// Usually means the post was removed from the imageboard after it was indexed.
    #[error("Post is missing an essential field {field}")]
    MissingField { field: String },

    #[error("Failed to read post rating: {source}")]
    UnknownRating {
        #[from]
        source: UnknownRatingError,
    },
}

impl PostError {
    #[inline]
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}
