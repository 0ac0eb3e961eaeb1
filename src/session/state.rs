use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    assets::decode::decode_image,
    composition::params::CompositionParams,
    encode::png::{CompositedOutput, output_file_name},
    foundation::{
        config::CompositorConfig,
        core::SourcePhoto,
        error::{ArwahError, ArwahResult},
    },
    render::compositor::Compositor,
    session::{
        final_render::{FinalRender, RenderStatus},
        preview::{PreviewDriver, PreviewState},
    },
};

/// Everything a card editor holds between user actions.
///
/// Parameter changes re-schedule the debounced preview; [`CardSession::generate`] performs the
/// final render.
#[derive(Debug)]
pub struct CardSession {
    compositor: Arc<Compositor>,
    file_prefix: String,
    photo: Option<Arc<SourcePhoto>>,
    params: CompositionParams,
    preview: PreviewDriver,
    final_render: FinalRender,
}

impl CardSession {
    /// Must be called inside a tokio runtime.
    pub fn new(compositor: Arc<Compositor>, cfg: &CompositorConfig) -> ArwahResult<Self> {
        cfg.validate()?;
        let preview = PreviewDriver::new(Arc::clone(&compositor), cfg.preview_debounce())?;
        Ok(Self {
            compositor,
            file_prefix: cfg.file_prefix.clone(),
            photo: None,
            params: CompositionParams::default(),
            preview,
            final_render: FinalRender::new(),
        })
    }

    /// Decode and adopt a new photo. On decode failure the session is left untouched.
    pub fn load_photo(&mut self, bytes: &[u8]) -> ArwahResult<()> {
        let photo = decode_image(bytes)?;
        self.set_photo(photo);
        Ok(())
    }

    pub fn set_photo(&mut self, photo: SourcePhoto) {
        tracing::info!(width = photo.width, height = photo.height, "photo loaded");
        self.photo = Some(Arc::new(photo));
        self.final_render.reset();
        self.refresh_preview();
    }

    pub fn photo(&self) -> Option<&Arc<SourcePhoto>> {
        self.photo.as_ref()
    }

    pub fn params(&self) -> &CompositionParams {
        &self.params
    }

    pub fn set_circle_size_percent(&mut self, pct: f64) -> ArwahResult<()> {
        self.params = self.params.clone().with_circle_size(pct / 100.0)?;
        self.refresh_preview();
        Ok(())
    }

    pub fn set_feather_percent(&mut self, pct: f64) -> ArwahResult<()> {
        self.params = self.params.clone().with_feather(pct / 100.0)?;
        self.refresh_preview();
        Ok(())
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        let caption = caption.into();
        let caption = (!caption.is_empty()).then_some(caption);
        self.params = self.params.clone().with_caption(caption);
        self.refresh_preview();
    }

    pub fn subscribe_preview(&self) -> watch::Receiver<PreviewState> {
        self.preview.subscribe()
    }

    pub fn preview(&self) -> PreviewState {
        self.preview.current()
    }

    pub fn final_status(&self) -> RenderStatus {
        self.final_render.status()
    }

    /// Final render with the current photo and parameters.
    pub async fn generate(&self) -> ArwahResult<Arc<CompositedOutput>> {
        let photo = self
            .photo
            .as_ref()
            .ok_or_else(|| ArwahError::validation("no photo loaded"))?;
        self.final_render
            .trigger(
                Arc::clone(&self.compositor),
                Arc::clone(photo),
                self.params.clone(),
            )
            .await
    }

    /// File name the finished card is offered under.
    pub fn download_name(&self) -> String {
        output_file_name(&self.file_prefix, self.params.caption_text())
    }

    /// Forget the photo, parameters, preview and finished card.
    pub fn reset(&mut self) {
        self.photo = None;
        self.params = CompositionParams::default();
        self.preview.clear();
        self.final_render.reset();
        tracing::debug!("session reset");
    }

    fn refresh_preview(&mut self) {
        if let Some(photo) = &self.photo {
            self.preview.schedule(Arc::clone(photo), self.params.clone());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
