use crate::backend::archive_backend::{FetchError, FetchedVersions, fetch_versions_from_host};
use crate::backend::hash_backend::spawn_digest;
use crate::config::ArchiveSettings;
use crate::messages::{ResponseMessage, WorkerCommand};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Run a fetch, turning a panic into an error so the UI always gets an answer
fn guarded_fetch<F>(fetch: F) -> Result<FetchedVersions, FetchError>
where
    F: FnOnce() -> Result<FetchedVersions, FetchError>,
{
    panic::catch_unwind(AssertUnwindSafe(fetch)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        Err(FetchError::WorkerFailed(reason))
    })
}

/// Runs archive fetches and digests away from the UI thread
pub struct Worker {
    receiver: Receiver<WorkerCommand>,
    response_sender: Sender<ResponseMessage>,
    settings: ArchiveSettings,
}

impl Worker {
    pub fn new(
        receiver: Receiver<WorkerCommand>,
        response_sender: Sender<ResponseMessage>,
        settings: ArchiveSettings,
    ) -> Self {
        Self {
            receiver,
            response_sender,
            settings,
        }
    }

    pub fn run(&self) {
        while let Ok(command) = self.receiver.recv() {
            match command {
                WorkerCommand::Fetch {
                    generation,
                    hostname,
                    sequence_id,
                    max_versions,
                } => {
                    let sender = self.response_sender.clone();
                    let settings = self.settings.clone();
                    // Each fetch gets its own thread; a newer one does not wait for a stale one
                    let spawned = thread::Builder::new()
                        .name(format!("fetch-{}", generation))
                        .spawn(move || {
                            let result = guarded_fetch(|| {
                                fetch_versions_from_host(max_versions, &hostname, &sequence_id, &settings)
                            });
                            if let Err(e) = &result {
                                tracing::error!("Fetch of {} from {} failed: {}", sequence_id, hostname, e);
                            }
                            if let Err(e) = sender.send(ResponseMessage::VersionsFetched { generation, result }) {
                                tracing::debug!("Dropping fetch result, receiver is gone: {}", e);
                            }
                        });

                    if let Err(e) = spawned {
                        tracing::error!("Failed to start fetch thread: {}", e);
                        let _ = self.response_sender.send(ResponseMessage::VersionsFetched {
                            generation,
                            result: Err(FetchError::WorkerFailed(e.to_string())),
                        });
                    }
                }
                WorkerCommand::Digest {
                    slot,
                    request,
                    sequence,
                } => {
                    spawn_digest(slot, request, sequence, self.response_sender.clone());
                }
            }
        }
        tracing::debug!("Worker channel closed, stopping");
    }
}

pub fn spawn_worker(settings: ArchiveSettings) -> (Sender<WorkerCommand>, Receiver<ResponseMessage>) {
    let (sender, receiver) = std::sync::mpsc::channel();
    let (response_sender, response_receiver) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let worker = Worker::new(receiver, response_sender, settings);
        worker.run();
    });
    (sender, response_receiver)
}
