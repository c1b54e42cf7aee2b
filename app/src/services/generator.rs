//! One generation cycle: render the QR bitmap, then compose the card.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use image::RgbaImage;
use qr_canvas::{BackgroundGradient, CanvasError, CardText, FontLibrary, StyleParameters, compose};
use qr_engine::{QrRenderError, QrRenderOptions, QrRenderer};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, RenderSync};

use super::form::{FormError, FormState};
use super::gradient::GradientSelection;
use super::logo::LogoState;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Render(#[from] QrRenderError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Generation was superseded by a newer request")]
    Cancelled,
    #[error("Generation worker failed: {0}")]
    Worker(String),
    #[error("Generation scheduler is not running")]
    SchedulerStopped,
}

impl GenerationError {
    /// Whether the cycle failed because the QR bitmap was not ready.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, GenerationError::Canvas(CanvasError::MissingSourceBitmap))
    }
}

/// Parameters for one generation, captured from the state objects.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub render: QrRenderOptions,
    pub style: StyleParameters,
    pub gradient: BackgroundGradient,
    pub title: String,
    pub tagline: String,
}

impl GenerationRequest {
    /// Snapshot the current form, gradient and logo.
    pub fn gather(
        form: &FormState,
        gradient: &GradientSelection,
        logo: &LogoState,
        config: &AppConfig,
    ) -> Result<Self, FormError> {
        let style = form.style()?;
        let logo = logo.options(config.logo_margin, config.logo_size);
        let render = form.render_options(&style, &config.default_url, logo);
        Ok(Self {
            render,
            style,
            gradient: gradient.current(),
            title: form.title.clone(),
            tagline: form.tagline.clone(),
        })
    }
}

/// A finished card.
#[derive(Debug, Clone)]
pub struct GeneratedCard {
    pub image: Arc<RgbaImage>,
    pub title: String,
    /// CSS equivalent of the background, for previews.
    pub background_css: String,
    pub generated_at: DateTime<Utc>,
}

/// Runs the renderer and the compositor off the async executor.
#[derive(Clone)]
pub struct Generator {
    renderer: Arc<dyn QrRenderer>,
    fonts: Arc<FontLibrary>,
}

impl Generator {
    pub fn new(renderer: Arc<dyn QrRenderer>, fonts: Arc<FontLibrary>) -> Self {
        Self { renderer, fonts }
    }

    /// Run one generation.
    ///
    /// With [`RenderSync::Signal`] the renderer's completion is awaited. With
    /// [`RenderSync::Delay`] the cycle sleeps the delay and composes whatever is
    /// ready, failing with `MissingSourceBitmap` if the renderer is still busy.
    pub async fn run(
        &self,
        request: GenerationRequest,
        sync: RenderSync,
        cancel: CancellationToken,
    ) -> Result<GeneratedCard, GenerationError> {
        let renderer = Arc::clone(&self.renderer);
        let options = request.render.clone();
        let mut handle = tokio::task::spawn_blocking(move || renderer.render(&options));

        let bitmap = match sync {
            RenderSync::Signal => tokio::select! {
                _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
                joined = &mut handle => Some(joined_bitmap(joined)?),
            },
            RenderSync::Delay(delay) => {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
                ready_bitmap(handle).await?
            }
        };

        let fonts = Arc::clone(&self.fonts);
        let GenerationRequest {
            style,
            gradient,
            title,
            tagline,
            ..
        } = request;
        let background_css = gradient.css();
        let composed = tokio::task::spawn_blocking(move || {
            let text = CardText::new(&title, &tagline);
            compose(bitmap.as_ref(), &style, &gradient, &text, &fonts).map(|img| (img, title))
        });

        let (image, title) = tokio::select! {
            _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
            joined = composed => joined.map_err(|e| GenerationError::Worker(e.to_string()))??,
        };

        tracing::debug!(width = image.width(), height = image.height(), "Card composed");
        Ok(GeneratedCard {
            image: Arc::new(image),
            title,
            background_css,
            generated_at: Utc::now(),
        })
    }
}

fn joined_bitmap(
    joined: Result<Result<RgbaImage, QrRenderError>, tokio::task::JoinError>,
) -> Result<RgbaImage, GenerationError> {
    Ok(joined.map_err(|e| GenerationError::Worker(e.to_string()))??)
}

/// The bitmap if the render task already finished; `None` if it is still running.
async fn ready_bitmap(
    handle: JoinHandle<Result<RgbaImage, QrRenderError>>,
) -> Result<Option<RgbaImage>, GenerationError> {
    if !handle.is_finished() {
        tracing::warn!("QR render not finished within the fixed delay");
        return Ok(None);
    }
    joined_bitmap(handle.await).map(Some)
}
