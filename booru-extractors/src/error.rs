use thiserror::Error;

/// Enumerates the possible errors that can arise while querying an imageboard.
///
/// Any of these aborts the search of the imageboard that raised it, but never the whole run.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// An error occurred during a network request (e.g., connection refused, DNS resolution
    /// failure) or the server answered with an error status.
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    /// The imageboard server returned a response that could not be understood or was not in the expected format.
    #[error("Imageboard returned an invalid response")]
    InvalidServerResponse,

    /// An error occurred while deserializing a JSON response from the imageboard API.
    #[error("Error while deserializing JSON: {0}")]
    JsonSerializeFail(#[from] serde_json::Error),

    /// An attempt was made to use an extractor with an imageboard it does not speak to.
    #[error("Invalid imageboard selected for this extractor: {imgboard}")]
    InvalidImageboard { imgboard: String },

    /// The imageboard has no post count endpoint configured.
    #[error("No post count endpoint configured for {imgboard}")]
    MissingCountEndpoint { imgboard: String },
}
