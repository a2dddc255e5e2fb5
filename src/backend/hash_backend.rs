use crate::constant::{DIGEST_FAILED, DIGEST_LEN, DIGEST_PLACEHOLDER};
use crate::messages::{DigestSlot, ResponseMessage};
use crate::record::normalize_sequence;
use sha2::{Digest, Sha256};
use std::sync::mpsc::Sender;
use std::thread;

/// Short SHA-256 fingerprint of a sequence, after FASTA normalization.
///
/// Missing or empty input yields the placeholder instead of the hash of nothing.
pub fn digest(text: Option<&str>) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return DIGEST_PLACEHOLDER.to_string();
    };

    let hash = Sha256::digest(normalize_sequence(text).as_bytes());
    let mut hex = format!("{:x}", hash);
    hex.truncate(DIGEST_LEN);
    hex
}

/// Compute a digest on its own thread and publish it to `slot`.
///
/// Results carry `request` so the receiver can drop answers for a superseded selection.
pub fn spawn_digest(slot: DigestSlot, request: u64, text: String, sender: Sender<ResponseMessage>) {
    let fallback = sender.clone();
    let spawned = thread::Builder::new()
        .name(format!("digest-{:?}", slot))
        .spawn(move || {
            let digest = digest(Some(&text));
            let _ = sender.send(ResponseMessage::DigestComputed {
                slot,
                request,
                digest,
            });
        });

    if let Err(e) = spawned {
        tracing::warn!("Hash calculation failed: {}", e);
        let _ = fallback.send(ResponseMessage::DigestComputed {
            slot,
            request,
            digest: DIGEST_FAILED.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn digest_is_stable() {
        assert_eq!(digest(Some("ACGT")), "1dff3e84");
        assert_eq!(digest(Some("ACGT")), digest(Some("ACGT")));
        assert_eq!(digest(Some("ACGT")).len(), DIGEST_LEN);
    }

    #[test]
    fn digest_normalizes_input() {
        assert_eq!(digest(Some(">header line\nac\n gt\n")), digest(Some("ACGT")));
    }

    #[test]
    fn empty_input_is_placeholder() {
        assert_eq!(digest(Some("")), DIGEST_PLACEHOLDER);
        assert_eq!(digest(None), DIGEST_PLACEHOLDER);
    }

    #[test]
    fn header_only_hashes_empty_sequence() {
        // sha256("") starts with e3b0c442
        assert_eq!(digest(Some(">only header")), "e3b0c442");
    }

    #[test]
    fn spawned_digests_publish_to_their_slot() {
        let (sender, receiver) = mpsc::channel();
        spawn_digest(DigestSlot::Old, 7, "ACGT".into(), sender.clone());
        spawn_digest(DigestSlot::New, 8, String::new(), sender);

        let mut results = Vec::new();
        for _ in 0..2 {
            match receiver.recv_timeout(Duration::from_secs(5)).unwrap() {
                ResponseMessage::DigestComputed {
                    slot,
                    request,
                    digest,
                } => results.push((slot, request, digest)),
                _ => panic!("unexpected message"),
            }
        }
        // completion order is not guaranteed
        results.sort_by_key(|(_, request, _)| *request);
        assert_eq!(results[0], (DigestSlot::Old, 7, "1dff3e84".to_string()));
        assert_eq!(results[1], (DigestSlot::New, 8, DIGEST_PLACEHOLDER.to_string()));
    }
}
