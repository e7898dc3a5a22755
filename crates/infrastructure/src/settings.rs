//! Scenario settings loader.
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `TANDEM_*` environment variables (e.g. `TANDEM_LOGIN_PATH`)

use std::path::Path;

use config::{Config, Environment, File, FileFormat, Map};
use tandem_domain::ScenarioSettings;
use tracing::debug;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TANDEM";

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A source could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The merged settings are unusable.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Loads scenario settings from defaults, `path` and the process environment.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or if the merged
/// settings fail validation.
pub fn load_settings(path: Option<&Path>) -> Result<ScenarioSettings, SettingsError> {
    load_settings_with_env(path, None)
}

/// Same as [`load_settings`], reading variables from `env` instead of the
/// process environment when given.
///
/// # Errors
///
/// See [`load_settings`].
pub fn load_settings_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<ScenarioSettings, SettingsError> {
    let defaults = ScenarioSettings::default();
    let mut builder = Config::builder()
        .set_default("login_path", defaults.login_path)?
        .set_default("session_cookie", defaults.session_cookie)?
        .set_default("fail_on_unauthorized", defaults.fail_on_unauthorized)?;

    if let Some(path) = path {
        debug!(path = %path.display(), "loading settings file");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(env),
    );

    let settings: ScenarioSettings = builder.build()?.try_deserialize()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &ScenarioSettings) -> Result<(), SettingsError> {
    if !settings.login_path.starts_with('/') {
        return Err(SettingsError::Invalid(format!(
            "login_path must start with '/': {}",
            settings.login_path
        )));
    }
    if settings.session_cookie.is_empty() {
        return Err(SettingsError::Invalid(
            "session_cookie must not be empty".to_string(),
        ));
    }
    Ok(())
}
