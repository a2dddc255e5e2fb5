//! Window-independent state of the comparator: fetch generations, the fetched
//! version list, the selected pair and the digest slots.

use crate::backend::archive_backend::{FetchError, FetchedVersions};
use crate::constant::{DIGEST_PENDING, DIGEST_PLACEHOLDER, FETCH_FAILED_MESSAGE};
use crate::messages::{DigestSlot, WorkerCommand};
use crate::record::VersionRecord;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Sequence,
    Metadata,
}

#[derive(Debug, Clone)]
struct DigestSlotState {
    request: u64,
    /// (fetch generation, version) the current request was made for
    key: Option<(u64, u32)>,
    value: String,
}

impl Default for DigestSlotState {
    fn default() -> Self {
        Self {
            request: 0,
            key: None,
            value: DIGEST_PLACEHOLDER.to_string(),
        }
    }
}

pub struct ComparatorState {
    pub hostname: String,
    pub sequence_id: String,
    pub max_versions: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub version1: Option<u32>,
    pub version2: Option<u32>,
    pub active_tab: Tab,
    generation: u64,
    /// Generation of the batch currently held in `versions`
    versions_generation: u64,
    versions: Vec<VersionRecord>,
    old_digest: DigestSlotState,
    new_digest: DigestSlotState,
}

/// Lowest and highest version, or the only version twice
pub fn default_selection(versions: &[VersionRecord]) -> Option<(u32, u32)> {
    let first = versions.first()?;
    let last = versions.last()?;
    Some((first.version, last.version))
}

impl ComparatorState {
    pub fn new(hostname: String, sequence_id: String, max_versions: u32) -> Self {
        Self {
            hostname,
            sequence_id,
            max_versions,
            loading: false,
            error: None,
            fetched_at: None,
            version1: None,
            version2: None,
            active_tab: Tab::default(),
            generation: 0,
            versions_generation: 0,
            versions: Vec::new(),
            old_digest: DigestSlotState::default(),
            new_digest: DigestSlotState::default(),
        }
    }

    /// Start a new fetch; results of every earlier fetch become stale
    pub fn begin_fetch(&mut self) -> WorkerCommand {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        WorkerCommand::Fetch {
            generation: self.generation,
            hostname: self.hostname.trim().to_string(),
            sequence_id: self.sequence_id.trim().to_string(),
            max_versions: self.max_versions,
        }
    }

    /// Apply a fetch result. Returns false if it belongs to a superseded fetch.
    pub fn apply_fetch(
        &mut self,
        generation: u64,
        result: Result<FetchedVersions, FetchError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale fetch result {} (current {})",
                generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        self.versions_generation = generation;
        match result {
            Ok(fetched) => {
                self.versions = fetched.versions;
                self.fetched_at = Some(fetched.fetched_at);
                let selection = default_selection(&self.versions);
                self.version1 = selection.map(|(v1, _)| v1);
                self.version2 = selection.map(|(_, v2)| v2);
            }
            Err(_) => {
                self.versions.clear();
                self.fetched_at = None;
                self.version1 = None;
                self.version2 = None;
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn versions(&self) -> &[VersionRecord] {
        &self.versions
    }

    /// The version list alongside both pickers, for editing the selection in place
    pub fn selection_mut(&mut self) -> (&[VersionRecord], &mut Option<u32>, &mut Option<u32>) {
        (&self.versions, &mut self.version1, &mut self.version2)
    }

    /// Whether a background answer is still expected
    pub fn is_waiting(&self) -> bool {
        self.loading
            || self.old_digest.value == DIGEST_PENDING
            || self.new_digest.value == DIGEST_PENDING
    }

    pub fn find(&self, version: Option<u32>) -> Option<&VersionRecord> {
        let version = version?;
        self.versions.iter().find(|v| v.version == version)
    }

    /// Both selected versions, when both are set and present
    pub fn selected_pair(&self) -> Option<(&VersionRecord, &VersionRecord)> {
        Some((self.find(self.version1)?, self.find(self.version2)?))
    }

    fn slot_mut(&mut self, slot: DigestSlot) -> &mut DigestSlotState {
        match slot {
            DigestSlot::Old => &mut self.old_digest,
            DigestSlot::New => &mut self.new_digest,
        }
    }

    pub fn digest(&self, slot: DigestSlot) -> &str {
        match slot {
            DigestSlot::Old => &self.old_digest.value,
            DigestSlot::New => &self.new_digest.value,
        }
    }

    /// Digest jobs for slots whose selected version changed since the last request
    pub fn digest_requests(&mut self) -> Vec<WorkerCommand> {
        let mut commands = Vec::new();

        for (slot, selected) in [
            (DigestSlot::Old, self.version1),
            (DigestSlot::New, self.version2),
        ] {
            let record = self
                .find(selected)
                .map(|r| (r.version, r.sequence.clone()));
            let key = record.as_ref().map(|(v, _)| (self.versions_generation, *v));

            let state = self.slot_mut(slot);
            if state.key == key {
                continue;
            }
            state.key = key;
            state.request += 1;

            match record {
                Some((_, sequence)) => {
                    state.value = DIGEST_PENDING.to_string();
                    commands.push(WorkerCommand::Digest {
                        slot,
                        request: state.request,
                        sequence,
                    });
                }
                None => state.value = DIGEST_PLACEHOLDER.to_string(),
            }
        }

        commands
    }

    /// Store a digest result. Returns false if the slot has moved on to another request.
    pub fn apply_digest(&mut self, slot: DigestSlot, request: u64, digest: String) -> bool {
        let state = self.slot_mut(slot);
        if state.request != request {
            return false;
        }
        state.value = digest;
        true
    }
}
