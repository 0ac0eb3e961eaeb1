use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{ArwahError, ArwahResult};

/// Runtime configuration for the compositor front end.
///
/// Loaded from an optional JSON file; every field has a default so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositorConfig {
    /// Path of the card template raster.
    pub template: PathBuf,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` caption fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Whether to load the platform's installed fonts.
    pub system_fonts: bool,
    /// Quiescence delay before a preview render fires.
    pub preview_debounce_ms: u64,
    /// Directory finished cards are written to.
    pub output_dir: PathBuf,
    /// File name prefix for finished cards.
    pub file_prefix: String,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("assets/template.jpg"),
            font_dirs: Vec::new(),
            system_fonts: true,
            preview_debounce_ms: 100,
            output_dir: PathBuf::from("."),
            file_prefix: "tahlil".to_string(),
        }
    }
}

impl CompositorConfig {
    /// Parse and validate a JSON config file.
    pub fn load(path: &Path) -> ArwahResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ArwahResult<()> {
        if self.preview_debounce_ms == 0 {
            return Err(ArwahError::validation("preview_debounce_ms must be > 0"));
        }
        if self.file_prefix.trim().is_empty() {
            return Err(ArwahError::validation("file_prefix must be non-empty"));
        }
        Ok(())
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }
}
