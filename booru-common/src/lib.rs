use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
};

// Public Exports
pub use ahash;
pub use directories;
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;

use clap::ValueEnum;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

pub mod macros;
pub mod post;

/// User agent sent on every request, to imageboard APIs and media hosts alike.
pub const USER_AGENT: &str = concat!("Rust Booru Importer/", env!("CARGO_PKG_VERSION"));

/// All currently supported imageboards and their underlying attributes
#[derive(Debug, Copy, Clone, Ord, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Booru {
    /// Represents the website ```https://danbooru.donmai.us```.
    Danbooru,
    /// Represents the website ```https://gelbooru.com```.
    Gelbooru,
    /// Represents the website ```https://yande.re```. Speaks the Moebooru API.
    Yandere,
    /// Represents the website ```https://konachan.com```. Speaks the Moebooru API.
    Konachan,
}

impl Display for Booru {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Danbooru => write!(f, "danbooru"),
            Self::Gelbooru => write!(f, "gelbooru"),
            Self::Yandere => write!(f, "yandere"),
            Self::Konachan => write!(f, "konachan"),
        }
    }
}

impl Booru {
    /// Every supported imageboard in the order a batch run visits them.
    pub const ALL: [Self; 4] = [Self::Danbooru, Self::Gelbooru, Self::Yandere, Self::Konachan];

    /// Each variant can generate a specific user-agent to connect to the imageboard site.
    ///
    /// It will always follow the version declared inside ```Cargo.toml```
    #[inline]
    pub fn user_agent(self) -> String {
        debug!("Using user-agent: {}", USER_AGENT);
        USER_AGENT.to_string()
    }

    #[inline]
    pub const fn pretty_name(self) -> &'static str {
        match self {
            Self::Danbooru => "Danbooru",
            Self::Gelbooru => "Gelbooru",
            Self::Yandere => "Yande.re",
            Self::Konachan => "Konachan",
        }
    }

    /// Returns the base URL for the website.
    #[inline]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Danbooru => "https://danbooru.donmai.us",
            Self::Gelbooru => "https://gelbooru.com",
            Self::Yandere => "https://yande.re",
            Self::Konachan => "https://konachan.com",
        }
    }

    /// Returns max number of posts a single API request can return
    #[inline]
    pub const fn max_post_limit(self) -> u16 {
        100
    }

    /// Builds the public page of a post, which is what gets recorded as its source.
    ///
    /// Always points to the canonical website, even when the API base url was overridden.
    #[inline]
    pub fn source_url(self, post_id: u64) -> String {
        match self {
            Self::Danbooru => format!("https://danbooru.donmai.us/posts/{post_id}"),
            Self::Gelbooru => {
                format!("https://gelbooru.com/index.php?page=post&s=view&id={post_id}")
            }
            Self::Yandere => format!("https://yande.re/post/show/{post_id}"),
            Self::Konachan => format!("https://konachan.com/post/show/{post_id}"),
        }
    }

    /// Returns a `PathBuf` pointing to the directory holding the importer's configuration.
    ///
    /// This is XDG-compliant and resolves to `$XDG_CONFIG_HOME/booru-importer` on Linux or
    /// `%APPDATA%/booru-importer` on Windows.
    ///
    /// Or you can set the env var `BOORU_IMPORTER_CONFIG_DIR` to point it to a custom location.
    #[inline]
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(custom) = env::var("BOORU_IMPORTER_CONFIG_DIR") {
            return Some(Path::new(&custom).to_path_buf());
        }

        ProjectDirs::from("", "", "booru-importer").map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Which imageboards a run should query, as typed by the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BooruSelector {
    Danbooru,
    Gelbooru,
    Konachan,
    Yandere,
    /// Query every supported imageboard, one after another
    All,
}

impl BooruSelector {
    /// Returns the single imageboard this selector names, or `None` for [`BooruSelector::All`].
    #[inline]
    pub const fn single(self) -> Option<Booru> {
        match self {
            Self::Danbooru => Some(Booru::Danbooru),
            Self::Gelbooru => Some(Booru::Gelbooru),
            Self::Konachan => Some(Booru::Konachan),
            Self::Yandere => Some(Booru::Yandere),
            Self::All => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Booru, BooruSelector, USER_AGENT};

    #[test]
    fn source_urls_follow_site_templates() {
        assert_eq!(
            Booru::Danbooru.source_url(42),
            "https://danbooru.donmai.us/posts/42"
        );
        assert_eq!(
            Booru::Gelbooru.source_url(42),
            "https://gelbooru.com/index.php?page=post&s=view&id=42"
        );
        assert_eq!(Booru::Yandere.source_url(7), "https://yande.re/post/show/7");
        assert_eq!(
            Booru::Konachan.source_url(7),
            "https://konachan.com/post/show/7"
        );
    }

    #[test]
    fn selector_maps_to_single_booru() {
        assert_eq!(BooruSelector::Konachan.single(), Some(Booru::Konachan));
        assert_eq!(BooruSelector::All.single(), None);
    }

    #[test]
    fn every_booru_shares_the_importer_user_agent() {
        assert!(USER_AGENT.starts_with("Rust Booru Importer/"));
        for booru in Booru::ALL {
            assert_eq!(booru.user_agent(), USER_AGENT);
        }
    }
}
