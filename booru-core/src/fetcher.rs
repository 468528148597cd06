//! Downloads post media into the temporary directory.
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::pin::pin;

use booru_common::log::debug;
use booru_common::reqwest::{Client, Url};
use booru_common::tokio::fs::{remove_file, OpenOptions};
use booru_common::tokio::io::{AsyncWriteExt, BufWriter};
use booru_common::USER_AGENT;
use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::error::DownloadError;

#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: Client,
    dest_dir: PathBuf,
}

impl MediaFetcher {
    #[must_use]
    pub const fn new(client: Client, dest_dir: PathBuf) -> Self {
        Self { client, dest_dir }
    }

    /// Fetcher with a plain client carrying the importer's user agent.
    pub fn with_default_client(dest_dir: PathBuf) -> Result<Self, DownloadError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::new(client, dest_dir))
    }

    #[inline]
    #[must_use]
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Last path segment of `url`, used as the local file name.
    pub fn file_name(url: &str) -> Result<String, DownloadError> {
        let invalid = || DownloadError::InvalidFileName {
            url: url.to_string(),
        };

        let parsed = Url::parse(url).map_err(|_| invalid())?;

        parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(invalid)
    }

    /// Streams `file_url` into the destination directory and returns where it was written.
    ///
    /// An existing file with the same name is overwritten. Nothing is left behind when the
    /// transfer breaks off.
    pub async fn fetch(&self, file_url: &str) -> Result<PathBuf, DownloadError> {
        let fname = Self::file_name(file_url)?;
        let out_path = self.dest_dir.join(&fname);

        debug!("Fetching {} into file {}", file_url, out_path.display());

        let res = self.client.get(file_url).send().await?;

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            debug!(
                "Image source {} returned status {}. Skipping download.",
                file_url,
                status.as_str()
            );
            return Err(DownloadError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        save_stream(res.bytes_stream(), &out_path).await?;

        debug!("Finished downloading {} successfully.", fname);
        Ok(out_path)
    }
}

/// Writes `stream` to `out_path`, removing the partial file if the transfer fails.
async fn save_stream<S, E>(stream: S, out_path: &Path) -> Result<(), DownloadError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let result = write_stream(stream, out_path).await;

    if result.is_err() {
        if let Err(err) = remove_file(out_path).await {
            debug!("Could not remove partial file {}: {}", out_path.display(), err);
        }
    }

    result
}

async fn write_stream<S, E>(stream: S, out_path: &Path) -> Result<(), DownloadError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut stream = pin!(stream);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out_path)
        .await?;

    let mut bw = BufWriter::new(file);

    while let Some(item) = stream.next().await {
        let mut chunk = item.map_err(|e| DownloadError::ChunkDownloadFail {
            message: e.to_string(),
        })?;
        bw.write_all_buf(&mut chunk).await?;
    }

    bw.flush().await?;
    Ok(())
}
