//! Arwah composes memorial cards: a portrait photo is cover-fitted into a circle, desaturated,
//! feathered and blended onto a fixed template, with an optional upper-cased name caption.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: photo and template bytes -> straight-alpha [`RasterImage`]s
//! 2. **Composite**: [`composite`] (template, cover-fit crop, grayscale, feather, caption)
//! 3. **Encode**: [`encode_png`] -> [`CompositedOutput`]
//!
//! Two calling contexts wrap the compositor: [`PreviewDriver`] re-renders after a debounce delay
//! and keeps only the newest result, [`FinalRender`] renders once on demand and keeps the result
//! until reset. [`CardSession`] owns both together with the current photo and parameters.
//!
//! The compositor is pure: identical inputs always produce pixel-identical output.
#![forbid(unsafe_code)]

mod assets;
mod composition;
mod effects;
mod encode;
mod foundation;
mod render;
mod session;
mod text;

pub use assets::decode::{decode_image, load_image};
pub use composition::params::{CIRCLE_SIZE_RANGE, CompositionParams, FEATHER_RANGE};
pub use effects::cover::{CoverFit, cover_fit};
pub use effects::desaturate::{desaturate_in_place, luma};
pub use effects::feather::{FeatherMask, apply_feather};
pub use encode::png::{CompositedOutput, encode_png, output_file_name, sanitize_file_stem};
pub use foundation::config::CompositorConfig;
pub use foundation::core::{Canvas, Point, RasterImage, Rect, SourcePhoto, TemplateImage};
pub use foundation::error::{ArwahError, ArwahResult};
pub use render::compositor::{Compositor, composite};
pub use render::layout::{ANCHOR_OFFSET_Y, CAPTION_GAP, CircleSlot, caption_font_px};
pub use session::final_render::{FinalRender, RenderStatus};
pub use session::preview::{PreviewDriver, PreviewState};
pub use session::state::CardSession;
pub use text::caption::{CaptionLayout, caption_svg};
pub use text::fonts::CaptionFonts;
