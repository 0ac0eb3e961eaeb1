use std::sync::Arc;

use crate::{
    assets::decode::load_image,
    composition::params::CompositionParams,
    effects::{
        composite::{LayerPlacement, over_at, over_in_place},
        cover::cover_fit,
        desaturate::desaturate_in_place,
        feather::{FeatherMask, apply_feather},
    },
    encode::png::{CompositedOutput, encode_png},
    foundation::{
        config::CompositorConfig,
        core::{RasterImage, SourcePhoto, TemplateImage, premultiply},
        error::ArwahResult,
    },
    render::layout::CircleSlot,
    text::{
        caption::{CaptionLayout, render_caption_layer},
        fonts::CaptionFonts,
    },
};

/// Render a card: template background, feathered grayscale portrait disc, optional caption.
///
/// Pure in its inputs: the same photo, template, parameters and fonts always yield the same
/// pixels. The output has the template's dimensions.
#[tracing::instrument(
    skip_all,
    fields(
        src_w = source.width,
        src_h = source.height,
        size = params.circle_size_fraction(),
        feather = params.feather_fraction(),
    )
)]
pub fn composite(
    source: &SourcePhoto,
    template: &TemplateImage,
    params: &CompositionParams,
    fonts: &CaptionFonts,
) -> ArwahResult<RasterImage> {
    let canvas = template.canvas();
    // Straight alpha throughout; only pixels a layer covers are re-blended.
    let mut frame = template.rgba8.clone();

    let slot = CircleSlot::for_canvas(canvas, params.circle_size_fraction());
    let side = slot.side_px();

    let mut crop = cover_fit(source, side)?;
    desaturate_in_place(&mut crop.rgba8);
    apply_feather(
        &mut crop.rgba8,
        side,
        FeatherMask::new(slot.radius, params.feather_fraction()),
    )?;

    let (x, y) = slot.top_left();
    over_at(
        &mut frame,
        &premultiplied(&crop.rgba8),
        LayerPlacement {
            dst_width: canvas.width,
            dst_height: canvas.height,
            src_width: side,
            src_height: side,
            x,
            y,
        },
    )?;

    if let Some(text) = params.caption_text() {
        let layout = CaptionLayout::new(text, canvas, &slot);
        let layer = render_caption_layer(canvas, &layout, fonts)?;
        over_in_place(&mut frame, &layer)?;
    }

    RasterImage::new(canvas.width, canvas.height, frame)
}

fn premultiplied(rgba8: &[u8]) -> Vec<u8> {
    rgba8
        .chunks_exact(4)
        .flat_map(|px| premultiply([px[0], px[1], px[2], px[3]]))
        .collect()
}

/// Template and fonts bundled once, shared by every render of a session.
#[derive(Clone, Debug)]
pub struct Compositor {
    template: Arc<TemplateImage>,
    fonts: CaptionFonts,
}

impl Compositor {
    pub fn new(template: TemplateImage, fonts: CaptionFonts) -> Self {
        Self {
            template: Arc::new(template),
            fonts,
        }
    }

    /// Load the template and caption fonts named by `cfg`.
    pub fn from_config(cfg: &CompositorConfig) -> ArwahResult<Self> {
        let template = load_image(&cfg.template)?;
        let fonts = CaptionFonts::load(cfg.system_fonts, &cfg.font_dirs);
        tracing::info!(
            template = %cfg.template.display(),
            width = template.width,
            height = template.height,
            "template loaded"
        );
        Ok(Self::new(template, fonts))
    }

    pub fn template(&self) -> &TemplateImage {
        &self.template
    }

    pub fn fonts(&self) -> &CaptionFonts {
        &self.fonts
    }

    pub fn composite(
        &self,
        source: &SourcePhoto,
        params: &CompositionParams,
    ) -> ArwahResult<RasterImage> {
        composite(source, &self.template, params, &self.fonts)
    }

    /// Composite and encode to PNG.
    pub fn render_png(
        &self,
        source: &SourcePhoto,
        params: &CompositionParams,
    ) -> ArwahResult<CompositedOutput> {
        let img = self.composite(source, params)?;
        encode_png(&img)
    }
}
