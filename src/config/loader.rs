//! Settings file loading.

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// Look for a `.i18n.json` file in the workspace root and parse it.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = workspace_root.join(".i18n.json");

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
