//! Remote archive access and content fingerprints

pub mod archive_backend;
pub mod hash_backend;
