//! Uploader that stages imported files into a library directory.
//!
//! Every file is moved into the library next to a `<file name>.json` sidecar holding its tags,
//! rating and source along with the tagging toggles the library should apply. A file is only
//! ever present in the library together with its sidecar.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use booru_core::upload::{UploadError, UploadMetadata, Uploader};
use log::debug;
use serde::Serialize;
use tokio::fs::{copy, remove_file, rename, write};

use crate::config::settings::TaggingToggles;

#[derive(Serialize)]
struct Sidecar<'a> {
    #[serde(flatten)]
    metadata: &'a UploadMetadata,
    #[serde(flatten)]
    tagging: TaggingToggles,
}

#[derive(Debug, Clone)]
pub struct StagingUploader {
    library_path: PathBuf,
    tagging: TaggingToggles,
}

impl StagingUploader {
    #[must_use]
    pub const fn new(library_path: PathBuf, tagging: TaggingToggles) -> Self {
        Self {
            library_path,
            tagging,
        }
    }

    async fn move_file(from: &Path, to: &Path) -> Result<(), UploadError> {
        if rename(from, to).await.is_ok() {
            return Ok(());
        }

        // Renaming fails across filesystems
        copy(from, to).await?;
        remove_file(from).await?;
        Ok(())
    }
}

#[async_trait]
impl Uploader for StagingUploader {
    async fn upload(&self, file: &Path, meta: &UploadMetadata) -> Result<(), UploadError> {
        if meta.source.trim().is_empty() {
            return Err(UploadError::MissingField {
                field: String::from("source"),
            });
        }

        let Some(file_name) = file.file_name() else {
            return Err(UploadError::Failed {
                message: format!("{} has no file name", file.display()),
            });
        };

        let sidecar = Sidecar {
            metadata: meta,
            tagging: self.tagging,
        };
        let json = serde_json::to_vec_pretty(&sidecar).map_err(|e| UploadError::Failed {
            message: e.to_string(),
        })?;

        // The sidecar goes first so the library never holds media without metadata
        let mut sidecar_name = file_name.to_os_string();
        sidecar_name.push(".json");
        let sidecar_path = self.library_path.join(sidecar_name);
        write(&sidecar_path, json).await?;

        let target = self.library_path.join(file_name);
        if let Err(err) = Self::move_file(file, &target).await {
            if let Err(cleanup) = remove_file(&sidecar_path).await {
                debug!(
                    "Could not remove sidecar {}: {}",
                    sidecar_path.display(),
                    cleanup
                );
            }
            return Err(err);
        }

        debug!("Staged {} into {}", file.display(), target.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use booru_common::post::rating::Safety;
    use booru_core::upload::{UploadError, UploadMetadata, Uploader};

    use super::StagingUploader;
    use crate::config::settings::TaggingToggles;

    const TOGGLES: TaggingToggles = TaggingToggles {
        auto_tag: false,
        deepbooru: false,
        saucenao: true,
    };

    fn meta(source: &str) -> UploadMetadata {
        UploadMetadata {
            tags: vec!["1girl".into(), "solo".into()],
            safety: Safety::Safe,
            source: source.into(),
        }
    }

    #[tokio::test]
    async fn moves_file_and_writes_sidecar() {
        let tmp = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();

        let file = tmp.path().join("1234.png");
        std::fs::write(&file, b"png").unwrap();

        let uploader = StagingUploader::new(library.path().to_path_buf(), TOGGLES);
        uploader
            .upload(&file, &meta("https://danbooru.donmai.us/posts/1234"))
            .await
            .unwrap();

        assert!(!file.exists());
        assert!(library.path().join("1234.png").exists());

        let sidecar: serde_json::Value = serde_json::from_slice(
            &std::fs::read(library.path().join("1234.png.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["safety"], "safe");
        assert_eq!(sidecar["source"], "https://danbooru.donmai.us/posts/1234");
        assert_eq!(sidecar["saucenao"], true);
        assert_eq!(sidecar["tags"][1], "solo");
    }

    #[tokio::test]
    async fn empty_source_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.png");
        std::fs::write(&file, b"png").unwrap();

        let uploader = StagingUploader::new(tmp.path().to_path_buf(), TOGGLES);
        let err = uploader.upload(&file, &meta("")).await.unwrap_err();

        assert!(matches!(err, UploadError::MissingField { .. }));
        assert!(file.exists());
    }

    #[tokio::test]
    async fn failed_move_leaves_no_sidecar() {
        let tmp = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();

        let uploader = StagingUploader::new(library.path().to_path_buf(), TOGGLES);
        let err = uploader
            .upload(
                &tmp.path().join("vanished.png"),
                &meta("https://yande.re/post/show/9"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Io { .. }), "{err}");
        assert!(!library.path().join("vanished.png").exists());
        assert!(!library.path().join("vanished.png.json").exists());
    }
}
