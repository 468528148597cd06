//! User configuration
//!
//! # Config file
//! Looked up in this order:
//! 1. The path given with `--config`
//! 2. `config.toml` in the working directory
//! 3. `config.toml` inside the importer's config directory (`$XDG_CONFIG_HOME/booru-importer`
//!    on Linux, or wherever `BOORU_IMPORTER_CONFIG_DIR` points)
//!
//! ```toml
//! tmp_path = "/tmp/booru-importer"
//! hide_progress = false
//!
//! [import_from_booru]
//! deepbooru_enabled = false
//!
//! [auto_tagger]
//! saucenao_enabled = true
//! deepbooru_enabled = false
//!
//! [upload]
//! library_path = "/srv/library"
//!
//! [logging]
//! log_enabled = false
//! log_file = "booru-importer.log"
//! log_level = "info"
//!
//! [danbooru]
//! user = ""
//! api_key = ""
//!
//! [yandere]
//! user = ""
//! password_hash = ""
//!
//! [servers.danbooru]
//! base_url = "https://danbooru.donmai.us"
//! ```
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use booru_common::Booru;
use booru_extractors::auth::Credentials;
use booru_extractors::extractor_config::ServerConfig;
use log::{debug, LevelFilter};
use serde::Deserialize;
use thiserror::Error;
use tokio::fs::read_to_string;

pub use self::settings::Settings;

pub mod settings;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found. Searched: {searched}")]
    NotFound { searched: String },

    #[error("Failed to read config file {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("{key} must point to an existing directory, got {path}")]
    InvalidDirectory { key: &'static str, path: String },

    #[error("Directory of log file {path} does not exist")]
    InvalidLogFile { path: String },

    #[error("Failed to open log file {path}: {source}")]
    LogFileOpen { path: String, source: io::Error },

    #[error("Unknown log level: {level}")]
    InvalidLogLevel { level: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImportFromBooruConfig {
    pub deepbooru_enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AutoTaggerConfig {
    pub saucenao_enabled: bool,
    pub deepbooru_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub library_path: PathBuf,
    #[serde(default)]
    pub auto_tag: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_enabled: bool,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_enabled: false,
            log_file: PathBuf::from("booru-importer.log"),
            log_level: String::from("info"),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| ConfigError::InvalidLogLevel {
            level: self.log_level.clone(),
        })
    }
}

/// Danbooru and Gelbooru credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiKeyConfig {
    pub user: String,
    pub api_key: String,
}

/// Moebooru sites authenticate with a salted password hash instead of an API key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordHashConfig {
    pub user: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerOverride {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub tmp_path: PathBuf,
    #[serde(default)]
    pub hide_progress: bool,
    #[serde(default)]
    pub import_from_booru: ImportFromBooruConfig,
    #[serde(default)]
    pub auto_tagger: AutoTaggerConfig,
    pub upload: UploadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub danbooru: ApiKeyConfig,
    #[serde(default)]
    pub gelbooru: ApiKeyConfig,
    #[serde(default)]
    pub yandere: PasswordHashConfig,
    #[serde(default)]
    pub konachan: PasswordHashConfig,
    #[serde(default)]
    pub servers: HashMap<Booru, ServerOverride>,
}

impl Config {
    /// Resolves, reads and validates the config file.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::locate(explicit)?;
        debug!("Reading config from {}", path.display());

        let raw = read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;

        let config = Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = Booru::config_dir() {
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            return Ok(found.clone());
        }

        Err(ConfigError::NotFound {
            searched: candidates
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dir("tmp_path", &self.tmp_path)?;
        check_dir("upload.library_path", &self.upload.library_path)?;

        self.logging.level()?;

        if self.logging.log_enabled {
            let parent = self
                .logging
                .log_file
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            if !parent.is_dir() {
                return Err(ConfigError::InvalidLogFile {
                    path: self.logging.log_file.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn credentials(&self, booru: Booru) -> Credentials {
        match booru {
            Booru::Danbooru => {
                Credentials::new(self.danbooru.user.clone(), self.danbooru.api_key.clone())
            }
            Booru::Gelbooru => {
                Credentials::new(self.gelbooru.user.clone(), self.gelbooru.api_key.clone())
            }
            Booru::Yandere => Credentials::new(
                self.yandere.user.clone(),
                self.yandere.password_hash.clone(),
            ),
            Booru::Konachan => Credentials::new(
                self.konachan.user.clone(),
                self.konachan.password_hash.clone(),
            ),
        }
    }

    /// Server configs for every imageboard with an overridden base url.
    pub fn server_overrides(&self) -> Vec<ServerConfig> {
        self.servers
            .iter()
            .map(|(booru, srv)| ServerConfig::with_base_url(*booru, &srv.base_url))
            .collect()
    }
}

fn check_dir(key: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::InvalidDirectory {
            key,
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use booru_common::Booru;

    use super::{Config, ConfigError};

    fn sample(tmp: &str, library: &str) -> String {
        format!(
            r#"
tmp_path = "{tmp}"

[upload]
library_path = "{library}"

[gelbooru]
user = "42"
api_key = "key"

[konachan]
user = "someone"
password_hash = "abcdef"

[servers.danbooru]
base_url = "http://127.0.0.1:9000/"
"#
        )
    }

    #[test]
    fn parses_sections_and_defaults() {
        let config = Config::parse(&sample("/tmp", "/srv")).unwrap();

        assert!(!config.hide_progress);
        assert!(!config.logging.log_enabled);
        assert_eq!(config.logging.log_level, "info");
        assert!(config.credentials(Booru::Gelbooru).state().is_auth());
        assert!(config.credentials(Booru::Konachan).state().is_auth());
        assert!(!config.credentials(Booru::Danbooru).state().is_auth());

        let overrides = config.server_overrides();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].post_list_url, "http://127.0.0.1:9000/posts.json");
    }

    #[tokio::test]
    async fn loads_and_validates_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            sample(
                &tmp.path().display().to_string(),
                &library.path().display().to_string()
            )
        )
        .unwrap();

        let config = Config::load(Some(file.path())).await.unwrap();
        assert_eq!(config.tmp_path, tmp.path());
    }

    #[tokio::test]
    async fn missing_tmp_path_directory_is_rejected() {
        let library = tempfile::tempdir().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            sample(
                "/definitely/not/here",
                &library.path().display().to_string()
            )
        )
        .unwrap();

        let err = Config::load(Some(file.path())).await.unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDirectory {
                key: "tmp_path",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tmp_path = [").unwrap();

        let err = Config::load(Some(file.path())).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn bad_log_level() {
        let mut config = Config::parse(&sample("/tmp", "/srv")).unwrap();
        config.logging.log_level = "chatty".into();
        assert!(matches!(
            config.logging.level(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }
}
