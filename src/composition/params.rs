use std::ops::RangeInclusive;

use crate::foundation::error::{ArwahError, ArwahResult};

/// Allowed circle radius, as a fraction of the template's smaller dimension.
pub const CIRCLE_SIZE_RANGE: RangeInclusive<f64> = 0.10..=0.30;
/// Allowed feather amount.
pub const FEATHER_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Inputs that, together with the photo and template, fully determine a rendered card.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompositionParams {
    circle_size_fraction: f64,
    feather_fraction: f64,
    caption: Option<String>,
}

impl Default for CompositionParams {
    fn default() -> Self {
        Self {
            circle_size_fraction: 0.18,
            feather_fraction: 0.30,
            caption: None,
        }
    }
}

impl CompositionParams {
    /// Create validated parameters from fractions.
    pub fn new(
        circle_size_fraction: f64,
        feather_fraction: f64,
        caption: Option<String>,
    ) -> ArwahResult<Self> {
        Self::default()
            .with_circle_size(circle_size_fraction)?
            .with_feather(feather_fraction)
            .map(|p| p.with_caption(caption))
    }

    /// Create validated parameters from slider-style percentages (10-30 and 0-100).
    pub fn from_percent(
        circle_size_pct: f64,
        feather_pct: f64,
        caption: Option<String>,
    ) -> ArwahResult<Self> {
        Self::new(circle_size_pct / 100.0, feather_pct / 100.0, caption)
    }

    pub fn with_circle_size(mut self, fraction: f64) -> ArwahResult<Self> {
        if !fraction.is_finite() || !CIRCLE_SIZE_RANGE.contains(&fraction) {
            return Err(ArwahError::validation(format!(
                "circle size {fraction} outside [{}, {}]",
                CIRCLE_SIZE_RANGE.start(),
                CIRCLE_SIZE_RANGE.end()
            )));
        }
        self.circle_size_fraction = fraction;
        Ok(self)
    }

    pub fn with_feather(mut self, fraction: f64) -> ArwahResult<Self> {
        if !fraction.is_finite() || !FEATHER_RANGE.contains(&fraction) {
            return Err(ArwahError::validation(format!(
                "feather {fraction} outside [0, 1]"
            )));
        }
        self.feather_fraction = fraction;
        Ok(self)
    }

    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption;
        self
    }

    pub fn circle_size_fraction(&self) -> f64 {
        self.circle_size_fraction
    }

    pub fn feather_fraction(&self) -> f64 {
        self.feather_fraction
    }

    /// Raw caption as entered, including surrounding whitespace.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Caption to draw, or `None` when it is absent or whitespace-only.
    pub fn caption_text(&self) -> Option<&str> {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
