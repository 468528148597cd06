//! Extractors for every supported imageboard.
//!
//! Each module holds one variant of [`BackendAdapter`]. Callers that only know which
//! [`Booru`] they want should go through [`build_adapter`].
use booru_common::Booru;

use crate::auth::Credentials;
use crate::error::ExtractorError;
use crate::extractor::BackendAdapter;
use crate::extractor_config::ServerConfig;

use self::danbooru::DanbooruExtractor;
use self::gelbooru::GelbooruExtractor;
use self::moebooru::MoebooruExtractor;

pub mod danbooru;

pub mod gelbooru;

pub mod moebooru;

/// Builds the extractor speaking the protocol of `config.server`.
pub fn build_adapter(
    config: ServerConfig,
    auth: Credentials,
) -> Result<Box<dyn BackendAdapter>, ExtractorError> {
    let adapter: Box<dyn BackendAdapter> = match config.server {
        Booru::Danbooru => Box::new(DanbooruExtractor::new(config, auth)?),
        Booru::Gelbooru => Box::new(GelbooruExtractor::new(config, auth)?),
        Booru::Yandere | Booru::Konachan => Box::new(MoebooruExtractor::new(config, auth)?),
    };

    Ok(adapter)
}
