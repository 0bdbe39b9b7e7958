use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Engine settings.
///
/// The defaults match the reference deployment: an English/German/Swedish
/// site with English as the fallback language and translation files under
/// `locales/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// The closed set of supported language codes.
    pub languages: Vec<String>,

    /// Language consulted when the requested one lacks a key.
    pub default_language: String,

    /// Directory holding one `<language>.json` file per language, relative
    /// to the workspace root.
    pub translation_dir: String,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "de".to_string(), "sv".to_string()],
            default_language: "en".to_string(),
            translation_dir: "locales".to_string(),
        }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Empty language list or empty/ill-formed language code
    /// - Default language not part of the language list
    /// - Empty translation directory
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [\"en\", \"de\", \"sv\"]",
            ));
        }

        for (index, code) in self.languages.iter().enumerate() {
            if code.is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    "Language code cannot be empty",
                ));
            } else if code.contains(['.', ',', '"']) || code.contains(char::is_whitespace) {
                // Codes end up as path segments and CSV header columns.
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    format!("Language code '{code}' must not contain '.', ',', '\"' or whitespace"),
                ));
            }
        }

        if !self.languages.is_empty() && !self.languages.contains(&self.default_language) {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "Default language '{}' must be one of the configured languages",
                    self.default_language
                ),
            ));
        }

        if self.translation_dir.is_empty() {
            errors.push(ValidationError::new(
                "translationDir",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"defaultLanguage": "sv"}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.default_language, eq("sv"));
        assert_that!(settings.languages, len(eq(3)));
        assert_that!(settings.translation_dir, eq("locales"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.languages, elements_are![eq("en"), eq("de"), eq("sv")]);
        assert_that!(settings.default_language, eq("en"));
    }

    #[rstest]
    fn validate_invalid_languages_empty() {
        let settings = I18nSettings { languages: vec![], ..I18nSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languages")),
                field!(ValidationError.message, contains_substring("At least one language"))
            ]])
        );
    }

    #[rstest]
    #[case::dot("en.us")]
    #[case::comma("en,us")]
    #[case::quote("en\"us")]
    #[case::whitespace("en us")]
    fn validate_invalid_language_code(#[case] code: &str) {
        let settings = I18nSettings {
            languages: vec!["en".to_string(), code.to_string()],
            ..I18nSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languages[1]")),
                field!(ValidationError.message, contains_substring("must not contain"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_default_language_not_listed() {
        let settings =
            I18nSettings { default_language: "fr".to_string(), ..I18nSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLanguage")),
                field!(ValidationError.message, contains_substring("'fr'"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_translation_dir_empty() {
        let settings = I18nSettings { translation_dir: String::new(), ..I18nSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationDir")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            languages: vec![],
            translation_dir: String::new(),
            ..I18nSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let message = format!("{config_error}");
        assert_that!(message, contains_substring("Configuration validation failed"));
        assert_that!(message, contains_substring("1. languages"));
        assert_that!(message, contains_substring("2. translationDir"));
    }
}
