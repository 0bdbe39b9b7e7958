//! Settings for the translation engine.
//!
//! The language set and the default language are configuration, not data the
//! engine manages; they are loaded once at startup from an optional
//! `.i18n.json` file and validated before anything is published.

mod loader;
mod types;

use std::path::Path;

pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};

/// Load and validate settings from a workspace root.
///
/// Falls back to [`I18nSettings::default`] when no `.i18n.json` file exists.
///
/// # Errors
/// - File read or JSON parse failure
/// - Validation failure
pub fn load_settings(workspace_root: &Path) -> Result<I18nSettings, ConfigError> {
    let settings = loader::load_from_workspace(workspace_root)?.unwrap_or_default();
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_load_settings_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();

        let settings = load_settings(temp_dir.path()).unwrap();

        assert_that!(settings.default_language, eq("en"));
    }

    #[rstest]
    fn test_load_settings_rejects_invalid_file() {
        // Default language not in the language list.
        let temp_dir = TempDir::new().unwrap();
        let config = r#"{"languages": ["de"], "defaultLanguage": "en"}"#;
        fs::write(temp_dir.path().join(".i18n.json"), config).unwrap();

        let result = load_settings(temp_dir.path());

        assert_that!(result, err(anything()));
    }

    #[rstest]
    fn test_load_settings_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = r#"{"languages": ["en", "de"], "defaultLanguage": "de"}"#;
        fs::write(temp_dir.path().join(".i18n.json"), config).unwrap();

        let settings = load_settings(temp_dir.path()).unwrap();

        assert_that!(settings.default_language, eq("de"));
        assert_that!(settings.languages, elements_are![eq("en"), eq("de")]);
    }
}
