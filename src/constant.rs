// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Sequence Version Comparator";

/// Application name, also the confy config namespace
pub const APP_NAME: &str = "Sequence Comparator";

/// Archive defaults
pub const DEFAULT_HOSTNAME: &str = "pathoplexus.org";
pub const DEFAULT_SEQUENCE_ID: &str = "PP_00003PJ";
pub const DEFAULT_MAX_VERSIONS: u32 = 10;
pub const MAX_VERSIONS_LIMIT: u32 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Digest slot display values
pub const DIGEST_PLACEHOLDER: &str = "—";
pub const DIGEST_PENDING: &str = "…";
pub const DIGEST_FAILED: &str = "error";
pub const DIGEST_LEN: usize = 8;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch versions. Check hostname and try again.";
