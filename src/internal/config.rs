use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::internal::errors::ConfigError;
use crate::internal::git::remote_url::DEFAULT_SSH_SCHEME;
use crate::internal::git::runner::DEFAULT_GIT_TIMEOUT;
use crate::internal::git::NormalizeOptions;

const CONFIG_ENV: &str = "GITLAB_BROWSE_CONFIG";
const GIT_TIMEOUT_ENV: &str = "GITLAB_BROWSE_GIT_TIMEOUT";
const SSH_SCHEME_ENV: &str = "GITLAB_BROWSE_SSH_SCHEME";
const BROWSER_ENV: &str = "GITLAB_BROWSE_BROWSER";

/// Configuration as written in the YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    git_timeout: Option<String>,
    ssh_scheme: Option<String>,
    browser: Option<String>,
    remote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub git_timeout: Duration,
    pub ssh_scheme: String,
    /// Browser command line; the URL is passed as last argument.
    pub browser: Option<Vec<String>>,
    /// Only consider this remote.
    pub remote: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_timeout: DEFAULT_GIT_TIMEOUT,
            ssh_scheme: DEFAULT_SSH_SCHEME.to_string(),
            browser: None,
            remote: None,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or from the default location when
    /// not given, then applies the environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Self::read_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::read_file(&path)?,
                _ => ConfigFile::default(),
            },
        };

        Self::from_file(Self::with_env_overrides(file))
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            ssh_scheme: self.ssh_scheme.clone(),
        }
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_env_overrides(mut file: ConfigFile) -> ConfigFile {
        let env = |key: &str| std::env::var(key).ok().filter(|value| !value.is_empty());

        if let Some(value) = env(GIT_TIMEOUT_ENV) {
            file.git_timeout = Some(value);
        }
        if let Some(value) = env(SSH_SCHEME_ENV) {
            file.ssh_scheme = Some(value);
        }
        if let Some(value) = env(BROWSER_ENV) {
            file.browser = Some(value);
        }
        file
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = file.git_timeout {
            config.git_timeout = humantime::parse_duration(value.trim())
                .map_err(|source| ConfigError::InvalidDuration { value, source })?;
        }

        if let Some(value) = file.ssh_scheme {
            let scheme = value.trim().to_ascii_lowercase();
            if scheme != "http" && scheme != "https" {
                return Err(ConfigError::InvalidScheme(value));
            }
            config.ssh_scheme = scheme;
        }

        if let Some(value) = file.browser {
            let argv = shell_words::split(&value)
                .map_err(|source| ConfigError::InvalidBrowser { value, source })?;
            if !argv.is_empty() {
                config.browser = Some(argv);
            }
        }

        config.remote = file.remote.filter(|remote| !remote.trim().is_empty());

        Ok(config)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|path| !path.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;

    Some(config_home.join("gitlab-browse").join("config.yaml"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
