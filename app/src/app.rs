use std::sync::Arc;

use image::RgbaImage;
use qr_canvas::FontLibrary;
use qr_engine::QrRenderer;
use tokio::sync::{RwLock, broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, SettingsManager};
use crate::services::form::{FormError, FormPatch, FormState};
use crate::services::generator::{GenerationError, GenerationRequest, Generator};
use crate::services::gradient::GradientSelection;
use crate::services::logo::LogoState;
use crate::services::scheduler::{GenerationScheduler, LatestCard, PipelineSettings};

/// Application shared state accessible from axum handlers and background tasks.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    /// Settings with runtime overrides
    settings: SettingsManager,
    /// Application configuration (reloadable)
    config: RwLock<AppConfig>,
    form: RwLock<FormState>,
    gradient: RwLock<GradientSelection>,
    logo: RwLock<LogoState>,
    server_port: u16,
    pipeline_tx: watch::Sender<PipelineSettings>,
    scheduler: GenerationScheduler,
    font_families: Vec<String>,
    /// Drawn once at startup
    scan_instruction: Arc<RgbaImage>,
    shutdown: CancellationToken,
}

impl SharedState {
    /// Create shared state and start the generation scheduler.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        settings: SettingsManager,
        config: AppConfig,
        fonts: FontLibrary,
        renderer: Arc<dyn QrRenderer>,
    ) -> Self {
        let (ws_tx, _) = broadcast::channel(256);
        let shutdown = CancellationToken::new();
        let (pipeline_tx, pipeline_rx) = watch::channel(PipelineSettings::from(&config));
        let font_families = fonts.families();
        let scan_instruction = Arc::new(qr_canvas::scan_instruction(&fonts));

        let generator = Generator::new(renderer, Arc::new(fonts));
        let (scheduler, _) =
            GenerationScheduler::start(generator, pipeline_rx, ws_tx.clone(), shutdown.clone());

        Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                settings,
                form: RwLock::new(FormState::new(&config)),
                gradient: RwLock::new(GradientSelection::default()),
                logo: RwLock::new(LogoState::default()),
                server_port: config.server_port,
                config: RwLock::new(config),
                pipeline_tx,
                scheduler,
                font_families,
                scan_instruction,
                shutdown,
            }),
        }
    }

    /// Port the server binds. Fixed at startup; a changed `SERVER_PORT` applies on restart.
    pub fn server_port(&self) -> u16 {
        self.inner.server_port
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    pub fn settings(&self) -> &SettingsManager {
        &self.inner.settings
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    /// Font families available for card text (lowercased).
    pub fn font_families(&self) -> &[String] {
        &self.inner.font_families
    }

    /// The scan-instruction illustration.
    pub fn scan_instruction(&self) -> Arc<RgbaImage> {
        Arc::clone(&self.inner.scan_instruction)
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.config.read().await
    }

    /// Reload config from the settings manager and push new timings to the scheduler.
    ///
    /// The form size is clamped into the new bounds. Returns true if it moved.
    pub async fn reload_config(&self) -> Result<bool, anyhow::Error> {
        let mut config = self.inner.config.write().await;
        config.reload(&self.inner.settings)?;
        self.inner.pipeline_tx.send_replace(PipelineSettings::from(&*config));

        let mut form = self.inner.form.write().await;
        let moved = form.clamp_size(&config);
        if moved {
            tracing::info!(
                size = form.size,
                min = config.min_size,
                max = config.max_size,
                "Form size clamped to new bounds"
            );
        }
        Ok(moved)
    }

    pub async fn form(&self) -> FormState {
        self.inner.form.read().await.clone()
    }

    /// Validate and apply a form patch, returning the updated form.
    pub async fn update_form(&self, patch: FormPatch) -> Result<FormState, FormError> {
        let config = self.config().await;
        let mut form = self.inner.form.write().await;
        form.apply(patch, &config)?;
        Ok(form.clone())
    }

    pub async fn gradient(&self) -> tokio::sync::RwLockWriteGuard<'_, GradientSelection> {
        self.inner.gradient.write().await
    }

    pub async fn logo(&self) -> tokio::sync::RwLockWriteGuard<'_, LogoState> {
        self.inner.logo.write().await
    }

    /// Snapshot the state objects and queue a debounced generation.
    pub async fn request_generation(&self) -> Result<(), GenerationError> {
        let request = {
            let config = self.inner.config.read().await;
            let form = self.inner.form.read().await;
            let gradient = self.inner.gradient.read().await;
            let logo = self.inner.logo.read().await;
            GenerationRequest::gather(&form, &gradient, &logo, &config)?
        };
        self.inner.scheduler.request(request).await
    }

    /// The latest generated card, if any.
    pub fn latest_card(&self) -> LatestCard {
        self.inner.scheduler.latest()
    }

    /// Receiver notified whenever a new card is published.
    pub fn subscribe_cards(&self) -> watch::Receiver<LatestCard> {
        self.inner.scheduler.subscribe()
    }
}
