use std::io;

use booru_common::post::error::PostError;
use thiserror::Error;

use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to access file: {source}")]
    FileIOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to connect to download URL: {source}")]
    ConnectionFail {
        #[from]
        source: reqwest::Error,
    },

    #[error("Download URL returned status {status}")]
    RemoteStatus { status: u16 },

    #[error("Error while fetching chunk: {message}")]
    ChunkDownloadFail { message: String },

    #[error("Could not derive a file name from {url}")]
    InvalidFileName { url: String },
}

/// Reasons a single post was skipped. None of them stop the import.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Normalize(#[from] PostError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
