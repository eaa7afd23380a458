//! CLI-owned configuration: TOML profiles merged with command-line flags
//! (the `OPNWEB_*` environment variables are wired through clap). Core
//! never reads files -- it receives a finished `ProviderConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use opnweb_core::{ProviderConfig, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One appliance profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Appliance root URL.
    pub url: Option<String>,

    /// Admin user.
    pub user: Option<String>,

    /// Plaintext password -- prefer OPNWEB_PASSWORD where possible.
    pub password: Option<String>,

    /// Accept self-signed certificates for this appliance.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "opnweb", "opnweb")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("opnweb.toml"))
}

/// Load the config file. A missing file reads as the empty config.
pub fn load(path: &Path) -> Result<Config, CliError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()?;
    Ok(config)
}

/// Build the provider configuration from the config file, the selected
/// profile, and command-line overrides (flags win over the profile).
pub fn resolve(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let path = config_path();
    let config = load(&path)?;
    resolve_with(global, &config, &path.display().to_string())
}

fn missing(field: &'static str, env: &'static str, path: &str) -> CliError {
    CliError::MissingConfig {
        field,
        env,
        path: path.to_owned(),
    }
}

pub fn resolve_with(
    global: &GlobalOpts,
    config: &Config,
    path: &str,
) -> Result<ProviderConfig, CliError> {
    let profile_name = global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = config
        .profiles
        .get(&profile_name)
        .cloned()
        .unwrap_or_default();

    let url = global
        .url
        .clone()
        .or(profile.url)
        .ok_or_else(|| missing("url", "URL", path))?;
    let username = global
        .user
        .clone()
        .or(profile.user)
        .ok_or_else(|| missing("user", "USER", path))?;
    let password = global
        .password
        .clone()
        .or(profile.password)
        .ok_or_else(|| missing("password", "PASSWORD", path))?;

    let url: Url = url.parse().map_err(|err: url::ParseError| CliError::Validation {
        field: "url",
        reason: err.to_string(),
    })?;

    let insecure = global.insecure || profile.insecure;
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ProviderConfig {
        url,
        username,
        password: SecretString::from(password),
        tls: if insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::VerifyFull
        },
        timeout: Duration::from_secs(timeout),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn bare_opts() -> GlobalOpts {
        GlobalOpts {
            url: None,
            user: None,
            password: None,
            insecure: false,
            timeout: None,
            profile: None,
            output: OutputFormat::Table,
            verbose: 0,
        }
    }

    fn full_profile() -> Profile {
        Profile {
            url: Some("https://10.0.0.1".into()),
            user: Some("root".into()),
            password: Some("fromfile".into()),
            insecure: true,
            timeout: Some(10),
        }
    }

    #[test]
    fn flags_win_over_the_profile() {
        let mut config = Config::default();
        config.profiles.insert("default".into(), full_profile());

        let mut opts = bare_opts();
        opts.url = Some("https://192.168.1.1".into());
        opts.timeout = Some(3);

        let resolved = resolve_with(&opts, &config, "test.toml").unwrap();
        assert_eq!(resolved.url.as_str(), "https://192.168.1.1/");
        assert_eq!(resolved.username, "root");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
        assert_eq!(resolved.tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn named_profile_is_selected_over_default() {
        let mut config = Config {
            default_profile: Some("home".into()),
            ..Config::default()
        };
        config.profiles.insert("home".into(), full_profile());

        let resolved = resolve_with(&bare_opts(), &config, "test.toml").unwrap();
        assert_eq!(resolved.url.as_str(), "https://10.0.0.1/");
        assert_eq!(resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_url_is_a_usage_error() {
        let err = resolve_with(&bare_opts(), &Config::default(), "test.toml").unwrap_err();
        assert!(matches!(err, CliError::MissingConfig { field: "url", .. }));
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn tls_verification_is_the_default() {
        let mut config = Config::default();
        config.profiles.insert(
            "default".into(),
            Profile {
                insecure: false,
                ..full_profile()
            },
        );

        let resolved = resolve_with(&bare_opts(), &config, "test.toml").unwrap();
        assert_eq!(resolved.tls, TlsMode::VerifyFull);
    }

    #[test]
    fn config_file_round_trips_through_toml() {
        let raw = r#"
            default_profile = "lab"

            [profiles.lab]
            url = "https://172.16.0.1"
            user = "root"
            password = "secret"
            insecure = true
        "#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, raw).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("lab"));
        assert!(config.profiles["lab"].insecure);
    }
}
