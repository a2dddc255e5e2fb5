use crate::config::ArchiveSettings;
use crate::constant::{DEFAULT_HOSTNAME, DEFAULT_SEQUENCE_ID, MAX_VERSIONS_LIMIT};
use crate::record::VersionRecord;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{url} did not return a JSON object")]
    NotAnObject { url: String },

    #[error("Archive unreachable: {0}")]
    Unreachable(String),

    #[error("Fetch task failed for version {0}")]
    TaskFailed(u32),

    #[error("Fetch worker failed: {0}")]
    WorkerFailed(String),
}

impl FetchError {
    /// Whether the archive could not be reached at all, as opposed to answering with an error
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout() || e.status().is_none(),
            Self::Unreachable(_) => true,
            _ => false,
        }
    }
}

/// Read access to the two endpoints of a sequence archive
pub trait ArchiveSource: Sync {
    fn fetch_metadata(&self, sequence_id: &str, version: u32) -> Result<Map<String, Value>, FetchError>;

    fn fetch_fasta(&self, sequence_id: &str, version: u32) -> Result<String, FetchError>;
}

/// Result of one fetch batch
#[derive(Debug, Clone)]
pub struct FetchedVersions {
    pub versions: Vec<VersionRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Archive reached over HTTP, optionally through a relay prefix
pub struct HttpArchive {
    client: Client,
    base_url: String,
}

impl HttpArchive {
    /// A blank `hostname` falls back to the configured default host
    pub fn new(hostname: &str, settings: &ArchiveSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| FetchError::Unreachable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url(settings.hostname_or_default(hostname), &settings.relay_prefix),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

impl ArchiveSource for HttpArchive {
    fn fetch_metadata(&self, sequence_id: &str, version: u32) -> Result<Map<String, Value>, FetchError> {
        let url = metadata_url(&self.base_url, sequence_id, version);
        let body = self.get(&url)?.text()?;

        match serde_json::from_str::<Value>(&body)? {
            Value::Object(map) => Ok(map),
            _ => Err(FetchError::NotAnObject { url }),
        }
    }

    fn fetch_fasta(&self, sequence_id: &str, version: u32) -> Result<String, FetchError> {
        let url = fasta_url(&self.base_url, sequence_id, version);
        Ok(self.get(&url)?.text()?)
    }
}

/// Build `{relay}https://{host}/seq/`, keeping an explicit scheme if the host carries one
pub fn base_url(hostname: &str, relay_prefix: &str) -> String {
    let host = hostname.trim().trim_end_matches('/');
    let host = if host.is_empty() { DEFAULT_HOSTNAME } else { host };

    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}{}/seq/", relay_prefix, host)
    } else {
        format!("{}https://{}/seq/", relay_prefix, host)
    }
}

pub fn metadata_url(base_url: &str, sequence_id: &str, version: u32) -> String {
    format!("{}{}.{}/details.json", base_url, sequence_id, version)
}

pub fn fasta_url(base_url: &str, sequence_id: &str, version: u32) -> String {
    format!("{}{}.{}.fa", base_url, sequence_id, version)
}

/// Fetch metadata and sequence of one version, both requests in parallel
fn fetch_version<S: ArchiveSource + ?Sized>(
    source: &S,
    sequence_id: &str,
    version: u32,
) -> Result<VersionRecord, FetchError> {
    let (metadata, fasta) = thread::scope(|scope| {
        let fasta = scope.spawn(|| source.fetch_fasta(sequence_id, version));
        let metadata = source.fetch_metadata(sequence_id, version);
        let fasta = fasta.join().unwrap_or_else(|_| Err(FetchError::TaskFailed(version)));
        (metadata, fasta)
    });

    Ok(VersionRecord::new(version, metadata?, &fasta?))
}

/// Fetch versions `1..=max_version` concurrently.
///
/// A version that fails is logged and left out. The whole batch only fails when
/// every version failed and the archive could not be reached for at least one of them.
pub fn fetch_all_versions<S: ArchiveSource + ?Sized>(
    source: &S,
    max_version: u32,
    sequence_id: &str,
) -> Result<Vec<VersionRecord>, FetchError> {
    let sequence_id = match sequence_id.trim() {
        "" => DEFAULT_SEQUENCE_ID,
        id => id,
    };

    let results: Vec<(u32, Result<VersionRecord, FetchError>)> = thread::scope(|scope| {
        let handles: Vec<_> = (1..=max_version)
            .map(|version| (version, scope.spawn(move || fetch_version(source, sequence_id, version))))
            .collect();

        handles
            .into_iter()
            .map(|(version, handle)| {
                let result = handle.join().unwrap_or_else(|_| Err(FetchError::TaskFailed(version)));
                (version, result)
            })
            .collect()
    });

    let mut versions = Vec::new();
    let mut last_transport_error = None;
    for (version, result) in results {
        match result {
            Ok(record) => versions.push(record),
            Err(e) => {
                tracing::warn!("Version {} of {} fetch failed: {}", version, sequence_id, e);
                if e.is_transport() {
                    last_transport_error = Some(e);
                }
            }
        }
    }

    if versions.is_empty()
        && let Some(e) = last_transport_error
    {
        return Err(FetchError::Unreachable(e.to_string()));
    }

    versions.sort_by_key(|record| record.version);
    tracing::info!("Fetched {} of {} versions of {}", versions.len(), max_version, sequence_id);
    Ok(versions)
}

/// Fetch from `hostname` over HTTP with the configured relay and timeout.
///
/// Blank inputs fall back to the configured default host and accession.
pub fn fetch_versions_from_host(
    max_version: u32,
    hostname: &str,
    sequence_id: &str,
    settings: &ArchiveSettings,
) -> Result<FetchedVersions, FetchError> {
    let archive = HttpArchive::new(hostname, settings)?;
    let sequence_id = settings.sequence_id_or_default(sequence_id);
    let max_version = max_version.min(MAX_VERSIONS_LIMIT);
    tracing::info!("Fetching {} versions of {} from {}", max_version, sequence_id, archive.base_url());

    let versions = fetch_all_versions(&archive, max_version, sequence_id)?;
    Ok(FetchedVersions {
        versions,
        fetched_at: Utc::now(),
    })
}
