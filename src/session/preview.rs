use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

use crate::{
    composition::params::CompositionParams,
    encode::png::CompositedOutput,
    foundation::{
        core::SourcePhoto,
        error::{ArwahError, ArwahResult},
    },
    render::compositor::Compositor,
};

/// Latest published preview.
#[derive(Clone, Debug, Default)]
pub enum PreviewState {
    /// Nothing rendered yet, or cleared.
    #[default]
    Empty,
    Ready {
        generation: u64,
        output: Arc<CompositedOutput>,
    },
    Failed {
        generation: u64,
        message: String,
    },
}

impl PreviewState {
    pub fn output(&self) -> Option<&Arc<CompositedOutput>> {
        match self {
            Self::Ready { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Empty => None,
            Self::Ready { generation, .. } | Self::Failed { generation, .. } => Some(*generation),
        }
    }
}

/// Debounced preview renderer.
///
/// Every [`PreviewDriver::schedule`] call cancels the pending render and starts a new delay.
/// Only the newest generation is ever published.
pub struct PreviewDriver {
    compositor: Arc<Compositor>,
    delay: Duration,
    runtime: Handle,
    latest: Arc<AtomicU64>,
    renders: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: Arc<watch::Sender<PreviewState>>,
}

impl PreviewDriver {
    /// Create a driver bound to the current tokio runtime.
    pub fn new(compositor: Arc<Compositor>, delay: Duration) -> ArwahResult<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            ArwahError::Other(anyhow::anyhow!("preview driver needs a tokio runtime: {e}"))
        })?;
        let (tx, _rx) = watch::channel(PreviewState::Empty);
        Ok(Self {
            compositor,
            delay,
            runtime,
            latest: Arc::new(AtomicU64::new(0)),
            renders: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx: Arc::new(tx),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> PreviewState {
        self.tx.borrow().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of renders that actually ran (superseded schedules never render).
    pub fn renders_completed(&self) -> u64 {
        self.renders.load(Ordering::SeqCst)
    }

    /// Schedule a render of `source` with `params` after the debounce delay.
    ///
    /// Returns the generation assigned to this request.
    pub fn schedule(&mut self, source: Arc<SourcePhoto>, params: CompositionParams) -> u64 {
        self.cancel_pending();
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let compositor = Arc::clone(&self.compositor);
        let latest = Arc::clone(&self.latest);
        let renders = Arc::clone(&self.renders);
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;

        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = compositor.render_png(&source, &params);
            renders.fetch_add(1, Ordering::SeqCst);

            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "discarding superseded preview");
                return;
            }
            let state = match result {
                Ok(output) => PreviewState::Ready {
                    generation,
                    output: Arc::new(output),
                },
                Err(err) => {
                    tracing::warn!(generation, %err, "preview render failed");
                    PreviewState::Failed {
                        generation,
                        message: err.to_string(),
                    }
                }
            };
            tx.send_replace(state);
        }));
        tracing::trace!(generation, "preview scheduled");
        generation
    }

    /// Cancel pending work and drop the current preview.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(PreviewState::Empty);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for PreviewDriver {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl std::fmt::Debug for PreviewDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewDriver")
            .field("delay", &self.delay)
            .field("generation", &self.latest.load(Ordering::SeqCst))
            .field("renders", &self.renders_completed())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
