use super::messages::{BackendEvent, BatchSummary};
use crate::collector::DownloadRequest;
use crate::downloader::{
    analyzing_status, converting_status, downloading_status, BatchProgress, ProgressEvent,
    ProgressState,
};
use crate::extractor::{DownloadOptions, Extractor};
use crate::utils::config::AppSettings;
use crate::utils::error::SocialloaderError;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Runs one batch of requests, strictly one after another
pub struct BackendActor {
    extractor: Arc<dyn Extractor>,
    settings: AppSettings,
    sender: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
}

impl BackendActor {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        settings: AppSettings,
        sender: mpsc::UnboundedSender<BackendEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            extractor,
            settings,
            sender,
            cancel,
        }
    }

    /// Download every request in order and report through the event channel.
    ///
    /// A failed request is reported and skipped; only cancellation stops the
    /// batch early. `BatchFinished` is always the last event sent.
    pub async fn run(self, requests: Vec<DownloadRequest>) -> BatchSummary {
        let span = info_span!("batch", id = %Uuid::new_v4(), total = requests.len());
        async move {
            info!("Batch started with {} via {}", requests.len(), self.extractor.id());
            let summary = self.process(&requests).await;
            info!(
                "Batch finished: {} succeeded, {} failed, cancelled: {}",
                summary.succeeded, summary.failed, summary.cancelled
            );
            self.emit(BackendEvent::BatchFinished(summary.clone()));
            summary
        }
        .instrument(span)
        .await
    }

    async fn process(&self, requests: &[DownloadRequest]) -> BatchSummary {
        let total = requests.len();
        let progress = Mutex::new(BatchProgress::new(total));
        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };

        for (index, request) in requests.iter().enumerate() {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let ordinal = index + 1;
            let fraction = {
                let mut progress = lock(&progress);
                progress.start_request(index);
                progress.overall()
            };
            self.emit(BackendEvent::RequestStarted {
                ordinal,
                total,
                url: request.url.clone(),
                fraction,
                status: analyzing_status(ordinal, total),
            });

            let options = DownloadOptions::for_request(request, &self.settings);
            let sender = self.sender.clone();
            let progress_ref = &progress;
            let on_progress = move |event: ProgressEvent| {
                let status = match event.status {
                    ProgressState::Downloading => downloading_status(ordinal, total, &event),
                    ProgressState::Finished => converting_status(ordinal, total),
                    ProgressState::Unknown => return,
                };
                let fraction = lock(progress_ref).apply(&event);
                let _ = sender.send(BackendEvent::Progress { fraction, status });
            };

            let result = tokio::select! {
                result = self.extractor.download(&request.url, &options, &on_progress) => Some(result),
                _ = self.cancel.cancelled() => None,
            };

            match result {
                Some(Ok(output_file)) => {
                    summary.succeeded += 1;
                    info!("Downloaded {}/{}: {} -> {:?}", ordinal, total, request.url, output_file);
                    self.emit(BackendEvent::RequestCompleted {
                        ordinal,
                        total,
                        url: request.url.clone(),
                        output_file,
                    });
                }
                Some(Err(e)) => {
                    summary.failed += 1;
                    error!("Failed {}/{}: {}: {}", ordinal, total, request.url, e);
                    self.emit(BackendEvent::RequestFailed {
                        ordinal,
                        total,
                        url: request.url.clone(),
                        error: e.to_string(),
                    });
                }
                None => {
                    info!("Cancelled while downloading {}", request.url);
                    summary.cancelled = true;
                    break;
                }
            }
        }

        summary
    }

    fn emit(&self, event: BackendEvent) {
        // The GUI may already be gone; nothing left to report to
        let _ = self.sender.send(event);
    }
}

/// A progress update must never be lost to a poisoned lock
fn lock(progress: &Mutex<BatchProgress>) -> std::sync::MutexGuard<'_, BatchProgress> {
    progress.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// GUI side of a running batch
pub struct BatchHandle {
    receiver: mpsc::UnboundedReceiver<BackendEvent>,
    cancel: CancellationToken,
}

impl BatchHandle {
    /// Wrap the receiving end of a worker's event channel
    pub fn new(
        receiver: mpsc::UnboundedReceiver<BackendEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self { receiver, cancel }
    }

    /// Try to receive the next worker event without blocking
    ///
    /// An error means the worker went away without finishing the batch.
    pub fn try_receive(&mut self) -> Result<Option<BackendEvent>, SocialloaderError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(SocialloaderError::WorkerError(
                "download worker stopped unexpectedly".to_string(),
            )),
        }
    }

    /// Stop after killing the running yt-dlp process
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Start a batch on its own worker thread.
///
/// The thread owns a single-threaded tokio runtime, so the caller's event
/// loop never waits on a download.
pub fn spawn_batch(
    requests: Vec<DownloadRequest>,
    extractor: Arc<dyn Extractor>,
    settings: AppSettings,
) -> Result<BatchHandle, SocialloaderError> {
    let (sender, receiver) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let total = requests.len();
    let actor = BackendActor::new(extractor, settings, sender.clone(), cancel.clone());

    std::thread::Builder::new()
        .name("download-worker".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to create worker runtime: {}", e);
                    let _ = sender.send(BackendEvent::UnexpectedError(format!(
                        "Failed to start download runtime: {}",
                        e
                    )));
                    let _ = sender.send(BackendEvent::BatchFinished(BatchSummary {
                        total,
                        ..Default::default()
                    }));
                    return;
                }
            };
            drop(sender);
            runtime.block_on(actor.run(requests));
        })?;

    Ok(BatchHandle::new(receiver, cancel))
}
