use crate::backend::archive_backend::{FetchError, FetchedVersions};

/// Display slot a digest result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestSlot {
    Old,
    New,
}

/// Commands accepted by the background worker
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    Fetch {
        generation: u64,
        hostname: String,
        sequence_id: String,
        max_versions: u32,
    },
    Digest {
        slot: DigestSlot,
        request: u64,
        sequence: String,
    },
}

/// Response messages from background operations
pub enum ResponseMessage {
    VersionsFetched {
        generation: u64,
        result: Result<FetchedVersions, FetchError>,
    },
    DigestComputed {
        slot: DigestSlot,
        request: u64,
        digest: String,
    },
}
