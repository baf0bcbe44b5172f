use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `CSYNC__API__USERNAME`.
pub const ENV_PREFIX: &str = "CSYNC";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "csync";

#[csync_derive::csync_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: file first, environment on top.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, `csync.{toml,json,yaml,..}` in
///    the working directory is used when present and skipped otherwise.
/// 2. **Environment Overrides**: variables prefixed with `CSYNC__`, nested with double
///    underscores (`CSYNC__API__BASE_URL` maps to `api.base_url`).
///
/// Fields missing from both layers fall back to `T`'s serde defaults.
///
/// # Errors
/// * The explicit file cannot be read or parsed.
/// * A value does not match the structure of `T`.
///
/// # Example
/// ```rust
/// use csync_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     per_page: u32,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_with_env(path, Environment::with_prefix(ENV_PREFIX).separator("__"))
}

fn load_with_env<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path.as_ref() {
        Some(p) => {
            info!("Loading config from {}", p.as_ref().display());
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csync_domain::config::AppConfig;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        Environment::with_prefix(ENV_PREFIX).separator("__").source(Some(map))
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://crm.test\"\nper_page = 25\n\n[log]\nlevel = \"debug\"")
            .unwrap();

        let cfg: AppConfig = load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(cfg.api.base_url, "https://crm.test");
        assert_eq!(cfg.api.per_page, 25);
        assert_eq!(cfg.api.timeout_secs, 15);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nusername = \"from-file\"").unwrap();

        let cfg: AppConfig = load_with_env(
            Some(file.path()),
            env(&[("CSYNC__API__USERNAME", "from-env"), ("CSYNC__API__PASSWORD", "pw")]),
        )
        .unwrap();
        assert_eq!(cfg.api.username, "from-env");
        assert!(cfg.api.credentials().is_complete());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_with_env::<AppConfig>(Some(&missing), env(&[])).unwrap_err();
        assert!(err.to_string().contains("Failed to build config"));
    }
}
