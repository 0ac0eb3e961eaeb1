use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    composition::params::CompositionParams,
    encode::png::CompositedOutput,
    foundation::{
        core::SourcePhoto,
        error::{ArwahError, ArwahResult},
    },
    render::compositor::Compositor,
};

#[derive(Clone, Debug, Default)]
pub enum RenderStatus {
    #[default]
    Idle,
    InProgress,
    Done(Arc<CompositedOutput>),
    Failed(String),
}

/// On-demand render whose result is kept until [`FinalRender::reset`].
#[derive(Debug)]
pub struct FinalRender {
    tx: Arc<watch::Sender<RenderStatus>>,
}

impl Default for FinalRender {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalRender {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RenderStatus::Idle);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<RenderStatus> {
        self.tx.subscribe()
    }

    pub fn status(&self) -> RenderStatus {
        self.tx.borrow().clone()
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(*self.tx.borrow(), RenderStatus::InProgress)
    }

    pub fn output(&self) -> Option<Arc<CompositedOutput>> {
        match &*self.tx.borrow() {
            RenderStatus::Done(out) => Some(Arc::clone(out)),
            _ => None,
        }
    }

    /// Run the compositor once on the blocking pool.
    ///
    /// Fails with [`ArwahError::Busy`] if a render is already running. The blocking task publishes
    /// its own outcome, so dropping this future mid-render still leaves `Done` or `Failed` behind.
    #[tracing::instrument(skip_all)]
    pub async fn trigger(
        &self,
        compositor: Arc<Compositor>,
        source: Arc<SourcePhoto>,
        params: CompositionParams,
    ) -> ArwahResult<Arc<CompositedOutput>> {
        let claimed = self.tx.send_if_modified(|status| {
            if matches!(status, RenderStatus::InProgress) {
                return false;
            }
            *status = RenderStatus::InProgress;
            true
        });
        if !claimed {
            return Err(ArwahError::busy("final render already running"));
        }

        let tx = Arc::clone(&self.tx);
        let joined = tokio::task::spawn_blocking(move || {
            let result = compositor.render_png(&source, &params).map(Arc::new);
            publish(&tx, &result);
            result
        })
        .await;

        joined.unwrap_or_else(|e| {
            let err = ArwahError::Other(anyhow::Error::new(e).context("final render task"));
            self.tx.send_replace(RenderStatus::Failed(err.to_string()));
            Err(err)
        })
    }

    /// Drop the retained output.
    pub fn reset(&self) {
        self.tx.send_replace(RenderStatus::Idle);
    }
}

fn publish(tx: &watch::Sender<RenderStatus>, result: &ArwahResult<Arc<CompositedOutput>>) {
    let status = match result {
        Ok(output) => {
            tracing::info!(
                width = output.width,
                height = output.height,
                bytes = output.png.len(),
                "final render done"
            );
            RenderStatus::Done(Arc::clone(output))
        }
        Err(err) => {
            tracing::warn!(%err, "final render failed");
            RenderStatus::Failed(err.to_string())
        }
    };
    tx.send_replace(status);
}
