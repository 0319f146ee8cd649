//! Connection settings for the catalog CLI
//!
//! Settings are resolved in this order:
//! 1. A named profile from a TOML profile file (`--profile`)
//! 2. The `NADA_URL`, `NADA_USERNAME`, `NADA_PASSWORD` and `NADA_TIMEOUT` environment variables
//! 3. The IHSN catalog without credentials
//!
//! A profile file looks like this:
//!
//! ```toml
//! [profiles.worldbank]
//! url = "https://microdata.worldbank.org/index.php/api/catalog"
//! timeout = 30
//!
//! [profiles.internal]
//! url = "https://nada.example.org/index.php/api/catalog"
//! username = "analyst"
//! password = "secret"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::client::{BaseClient, IHSN_CATALOG};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("profile '{0}' not found")]
    UnknownProfile(String),

    #[error("a profile was requested but no profile file was found")]
    MissingProfileFile,

    #[error("invalid timeout '{0}', expected a number of seconds")]
    InvalidTimeout(String),

    #[error("failed to build http client: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Connection settings for a single catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogProfile {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Request timeout in seconds. No timeout when unset.
    pub timeout: Option<u64>,
}

impl Default for CatalogProfile {
    fn default() -> Self {
        CatalogProfile {
            url: IHSN_CATALOG.to_string(),
            username: None,
            password: None,
            timeout: None,
        }
    }
}

impl CatalogProfile {
    /// Reads the profile from `NADA_*` environment variables.
    ///
    /// Returns `None` if `NADA_URL` is not set.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(url) = lookup("NADA_URL") else {
            return Ok(None);
        };

        let timeout = match lookup("NADA_TIMEOUT") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            None => None,
        };

        Ok(Some(CatalogProfile {
            url,
            username: lookup("NADA_USERNAME"),
            password: lookup("NADA_PASSWORD"),
            timeout,
        }))
    }

    /// Builds a client for this profile.
    ///
    /// Credentials are only applied when both username and password are set.
    pub fn build_client(&self) -> Result<BaseClient, ConfigError> {
        let mut builder = BaseClient::builder(&self.url);

        if let Some(timeout) = self.timeout {
            let transport = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout))
                .build()?;
            builder = builder.http_client(transport);
        }

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            builder = builder.url_auth(username, password);
        }

        Ok(builder.build())
    }
}

/// Contents of a profile file.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub profiles: HashMap<String, CatalogProfile>,
}

impl ProfileFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    pub fn profile(&self, name: &str) -> Result<&CatalogProfile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }
}

/// Location of the profile file when none is given explicitly.
///
/// `$NADA_CONFIG` if set, otherwise `$HOME/.config/nada/profiles.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("NADA_CONFIG") {
        return Some(PathBuf::from(path));
    }

    std::env::var("HOME")
        .ok()
        .map(|home| Path::new(&home).join(".config/nada/profiles.toml"))
}

/// Resolves the connection settings for this invocation.
///
/// # Arguments
/// * `config` - Explicit path of the profile file
/// * `profile` - Name of the profile to use
pub fn resolve_profile(
    config: Option<PathBuf>,
    profile: Option<&str>,
) -> Result<CatalogProfile, ConfigError> {
    if let Some(name) = profile {
        let path = config
            .or_else(default_config_path)
            .ok_or(ConfigError::MissingProfileFile)?;
        let file = ProfileFile::load(&path)?;
        return file.profile(name).cloned();
    }

    Ok(CatalogProfile::from_env()?.unwrap_or_default())
}
