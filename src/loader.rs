//! Translation file loading.
//!
//! Reads one `<language>.json` file per configured language from the
//! translation directory and builds the initial [`TranslationSet`]. A
//! missing file is soft (the language publishes an empty tree and falls back
//! everywhere); an unreadable or unparsable file is a hard error, since
//! shipping a silently truncated language is worse than failing startup.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::config::I18nSettings;
use crate::store::TranslationSet;
use crate::tree::TranslationTree;

/// Errors while loading translation files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A translation file exists but could not be read.
    #[error("Failed to read translation file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// A translation file is not valid JSON.
    #[error("Failed to parse translation file {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Load every configured language from `<workspace_root>/<translation_dir>`.
pub fn load_translation_set(
    workspace_root: &Path,
    settings: &I18nSettings,
) -> Result<TranslationSet, LoadError> {
    let dir = workspace_root.join(&settings.translation_dir);
    let mut set = TranslationSet::new(settings.default_language.clone());

    for language in &settings.languages {
        let path = dir.join(format!("{language}.json"));
        set.insert(language.clone(), load_tree(&path, language)?);
    }

    Ok(set)
}

fn load_tree(path: &Path, language: &str) -> Result<TranslationTree, LoadError> {
    if !path.exists() {
        tracing::warn!(
            language,
            path = %path.display(),
            "translation file not found, publishing an empty tree"
        );
        return Ok(TranslationTree::new());
    }

    tracing::debug!(language, path = %path.display(), "loading translation file");

    let content = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let json: Value = serde_json::from_str(&content)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;

    Ok(TranslationTree::from_json(&json))
}
