//! Debounced, serialized generation.
//!
//! A single worker task collapses bursts of requests into one generation after
//! a quiet period, keeps at most one generation in flight, and cancels it when
//! a newer request arrives. The latest successful card is published through a
//! `watch` channel; completion and failure events go to WebSocket clients.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, RenderSync};

use super::generator::{GeneratedCard, GenerationError, GenerationRequest, Generator};

/// Maximum number of queued generation requests.
const QUEUE_CAPACITY: usize = 64;

/// Timing settings read by the worker at the start of each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub debounce: Duration,
    pub sync: RenderSync,
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            debounce: config.debounce_delay,
            sync: config.render_sync,
        }
    }
}

pub type LatestCard = Option<Arc<GeneratedCard>>;

/// Handle for submitting requests and reading the latest card.
#[derive(Clone)]
pub struct GenerationScheduler {
    tx: mpsc::Sender<GenerationRequest>,
    latest: watch::Receiver<LatestCard>,
}

impl GenerationScheduler {
    /// Spawn the worker task.
    pub fn start(
        generator: Generator,
        settings: watch::Receiver<PipelineSettings>,
        events: broadcast::Sender<String>,
        shutdown: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let (latest_tx, latest) = watch::channel(None);
        let worker = Worker {
            generator,
            settings,
            latest: latest_tx,
            events,
            shutdown,
        };
        let handle = tokio::spawn(worker.run(rx));
        tracing::info!("Generation scheduler started (capacity={QUEUE_CAPACITY})");
        (Self { tx, latest }, handle)
    }

    /// Queue a request. It runs once no newer request arrives within the debounce delay.
    pub async fn request(&self, request: GenerationRequest) -> Result<(), GenerationError> {
        self.tx
            .send(request)
            .await
            .map_err(|_| GenerationError::SchedulerStopped)
    }

    /// The latest successfully generated card.
    pub fn latest(&self) -> LatestCard {
        self.latest.borrow().clone()
    }

    /// Receiver notified whenever a new card is published.
    pub fn subscribe(&self) -> watch::Receiver<LatestCard> {
        self.latest.clone()
    }
}

struct Worker {
    generator: Generator,
    settings: watch::Receiver<PipelineSettings>,
    latest: watch::Sender<LatestCard>,
    events: broadcast::Sender<String>,
    shutdown: CancellationToken,
}

impl Worker {
    async fn run(self, mut rx: mpsc::Receiver<GenerationRequest>) {
        loop {
            let first = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                msg = rx.recv() => msg,
            };
            let Some(mut request) = first else { break };

            'cycle: loop {
                let PipelineSettings { debounce, sync } = *self.settings.borrow();

                // Quiet period: every new request restarts the timer.
                loop {
                    tokio::select! {
                        _ = self.shutdown.cancelled() => return,
                        msg = rx.recv() => match msg {
                            Some(newer) => request = newer,
                            None => return,
                        },
                        _ = tokio::time::sleep(debounce) => break,
                    }
                }

                let cancel = self.shutdown.child_token();
                let generation = self.generator.run(request, sync, cancel.clone());
                tokio::pin!(generation);

                tokio::select! {
                    result = &mut generation => {
                        self.publish(result);
                        break 'cycle;
                    }
                    msg = rx.recv() => {
                        cancel.cancel();
                        match msg {
                            Some(newer) => {
                                tracing::debug!("Generation superseded by a newer request");
                                request = newer;
                            }
                            None => return,
                        }
                    }
                    _ = self.shutdown.cancelled() => return,
                }
            }
        }
        tracing::info!("Generation scheduler stopped");
    }

    fn publish(&self, result: Result<GeneratedCard, GenerationError>) {
        match result {
            Ok(card) => {
                tracing::info!(
                    width = card.image.width(),
                    height = card.image.height(),
                    "Generation complete"
                );
                let event = json!({
                    "type": "generation_complete",
                    "data": {
                        "width": card.image.width(),
                        "height": card.image.height(),
                        "background": card.background_css,
                        "generatedAt": card.generated_at.to_rfc3339(),
                    }
                });
                self.latest.send_replace(Some(Arc::new(card)));
                let _ = self.events.send(event.to_string());
            }
            Err(GenerationError::Cancelled) => {
                tracing::debug!("Generation cancelled");
            }
            Err(e) => {
                tracing::error!(error = %e, "Generation failed");
                let event = json!({
                    "type": "generation_error",
                    "data": {
                        "error": e.to_string(),
                        "missingSource": e.is_missing_source(),
                    }
                });
                let _ = self.events.send(event.to_string());
            }
        }
    }
}
