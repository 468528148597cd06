use std::path::PathBuf;

use serde::Serialize;

use super::Config;

/// Tagging toggles handed to the library along with every imported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaggingToggles {
    pub auto_tag: bool,
    pub deepbooru: bool,
    pub saucenao: bool,
}

/// Run settings, computed once from the [`Config`] and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tmp_path: PathBuf,
    pub library_path: PathBuf,
    pub hide_progress: bool,
    pub tagging: TaggingToggles,
}

impl Settings {
    /// Posts coming from a booru already carry tags, so the only tagger worth running on them
    /// is Deepbooru, and only when the import asks for it.
    pub fn derive(config: &Config) -> Self {
        let tagging = if config.import_from_booru.deepbooru_enabled {
            TaggingToggles {
                auto_tag: true,
                deepbooru: true,
                saucenao: false,
            }
        } else {
            TaggingToggles {
                auto_tag: false,
                deepbooru: config.auto_tagger.deepbooru_enabled,
                saucenao: config.auto_tagger.saucenao_enabled,
            }
        };

        Self {
            tmp_path: config.tmp_path.clone(),
            library_path: config.upload.library_path.clone(),
            hide_progress: config.hide_progress,
            tagging,
        }
    }
}
