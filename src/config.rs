//! Application configuration module
//!
//! Settings are stored with `confy` in the OS-specific config directory. Launch
//! parameters override the configured defaults for a single run.

use crate::constant::{
    APP_NAME, DEFAULT_HOSTNAME, DEFAULT_MAX_VERSIONS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SEQUENCE_ID, MAX_VERSIONS_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        settings.archive = settings.archive.clamped();
        Ok(Self { settings })
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Using built-in settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Remote archive access
    #[serde(default)]
    pub archive: ArchiveSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    /// Host queried when the input field is left empty
    #[serde(default = "default_hostname")]
    pub default_hostname: String,

    /// Accession queried when the input field is left empty
    #[serde(default = "default_sequence_id")]
    pub default_sequence_id: String,

    /// Versions 1..=max_versions are requested on every fetch
    #[serde(default = "default_max_versions")]
    pub max_versions: u32,

    /// Prepended verbatim to every archive URL, e.g. a CORS relay. Empty for direct access.
    #[serde(default)]
    pub relay_prefix: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

fn default_sequence_id() -> String {
    DEFAULT_SEQUENCE_ID.to_string()
}

fn default_max_versions() -> u32 {
    DEFAULT_MAX_VERSIONS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            default_hostname: default_hostname(),
            default_sequence_id: default_sequence_id(),
            max_versions: default_max_versions(),
            relay_prefix: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ArchiveSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Cap `max_versions`; every version costs two concurrent requests
    pub fn clamped(mut self) -> Self {
        if self.max_versions > MAX_VERSIONS_LIMIT {
            tracing::warn!(
                "max_versions {} exceeds {}, clamping",
                self.max_versions,
                MAX_VERSIONS_LIMIT
            );
            self.max_versions = MAX_VERSIONS_LIMIT;
        }
        self
    }

    /// The given host, or the configured default when it is blank
    pub fn hostname_or_default<'a>(&'a self, hostname: &'a str) -> &'a str {
        match hostname.trim() {
            "" => self.default_hostname.trim(),
            host => host,
        }
    }

    /// The given accession, or the configured default when it is blank
    pub fn sequence_id_or_default<'a>(&'a self, sequence_id: &'a str) -> &'a str {
        match sequence_id.trim() {
            "" => self.default_sequence_id.trim(),
            id => id,
        }
    }
}

/// Initial hostname and accession given on the command line.
///
/// Accepts `--server <host>` / `--accession <id>` pairs or a single query string
/// such as `?server=example.org&accession=PP_0001`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub server: Option<String>,
    pub accession: Option<String>,
}

impl LaunchParams {
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" => params.server = args.next(),
                "--accession" => params.accession = args.next(),
                _ if arg.contains('=') => params.merge_query(&arg),
                _ => tracing::warn!("Ignoring unknown argument {:?}", arg),
            }
        }

        params
    }

    fn merge_query(&mut self, query: &str) {
        let query = query.trim_start_matches('?');
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match key.trim_start_matches("--") {
                "server" => self.server = Some(value.to_string()),
                "accession" => self.accession = Some(value.to_string()),
                _ => {}
            }
        }
    }

    /// Resolve the initial (hostname, accession) inputs against the configured defaults
    pub fn resolve(&self, archive: &ArchiveSettings) -> (String, String) {
        (
            self.server
                .clone()
                .unwrap_or_else(|| archive.default_hostname.clone()),
            self.accession
                .clone()
                .unwrap_or_else(|| archive.default_sequence_id.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_parsed() {
        let params = LaunchParams::from_args(["--server", "loculus.example", "--accession", "LOC_1"]);
        assert_eq!(params.server.as_deref(), Some("loculus.example"));
        assert_eq!(params.accession.as_deref(), Some("LOC_1"));
    }

    #[test]
    fn query_string_is_parsed() {
        let params = LaunchParams::from_args(["?server=loculus.example&accession=LOC_2&x=1"]);
        assert_eq!(params.server.as_deref(), Some("loculus.example"));
        assert_eq!(params.accession.as_deref(), Some("LOC_2"));

        let params = LaunchParams::from_args(["--accession=LOC_3"]);
        assert_eq!(params.accession.as_deref(), Some("LOC_3"));
        assert_eq!(params.server, None);
    }

    #[test]
    fn defaults_fill_missing_params() {
        let archive = ArchiveSettings::default();
        let (host, id) = LaunchParams::default().resolve(&archive);
        assert_eq!(host, DEFAULT_HOSTNAME);
        assert_eq!(id, DEFAULT_SEQUENCE_ID);

        let params = LaunchParams::from_args(["server=other.org"]);
        assert_eq!(params.resolve(&archive).0, "other.org");
    }

    #[test]
    fn partial_settings_file_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"archive": {"relay_prefix": "https://relay.example/?"}}"#)
                .unwrap();
        assert_eq!(settings.archive.relay_prefix, "https://relay.example/?");
        assert_eq!(settings.archive.max_versions, DEFAULT_MAX_VERSIONS);
        assert_eq!(settings.archive.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn blank_inputs_fall_back_to_configured_defaults() {
        let archive = ArchiveSettings {
            default_hostname: "loculus.example".into(),
            default_sequence_id: "LOC_9".into(),
            ..ArchiveSettings::default()
        };
        assert_eq!(archive.hostname_or_default("  "), "loculus.example");
        assert_eq!(archive.hostname_or_default(" other.org "), "other.org");
        assert_eq!(archive.sequence_id_or_default(""), "LOC_9");
        assert_eq!(archive.sequence_id_or_default("PP_1"), "PP_1");
    }

    #[test]
    fn oversized_max_versions_is_clamped() {
        let settings: Settings =
            serde_json::from_str(r#"{"archive": {"max_versions": 1000000}}"#).unwrap();
        assert_eq!(settings.archive.clamped().max_versions, MAX_VERSIONS_LIMIT);
        assert_eq!(ArchiveSettings::default().clamped().max_versions, DEFAULT_MAX_VERSIONS);
    }
}
