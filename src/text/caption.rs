use std::fmt::Write as _;

use crate::{
    foundation::{
        core::Canvas,
        error::{ArwahError, ArwahResult},
    },
    render::layout::{CircleSlot, caption_font_px},
    text::fonts::CaptionFonts,
};

/// Shadow offset in pixels, applied on both axes.
pub const SHADOW_OFFSET: f64 = 2.0;

/// Where and how large a caption is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    /// Upper-cased caption text.
    pub text: String,
    pub font_px: f64,
    /// Horizontal centre of the text.
    pub x: f64,
    pub baseline: f64,
}

impl CaptionLayout {
    pub fn new(caption: &str, canvas: Canvas, slot: &CircleSlot) -> Self {
        Self {
            text: caption.trim().to_uppercase(),
            font_px: caption_font_px(canvas),
            x: slot.center.x,
            baseline: slot.caption_baseline(),
        }
    }
}

/// SVG document holding the shadow run and the solid run of a caption.
pub fn caption_svg(canvas: Canvas, layout: &CaptionLayout) -> String {
    let text = escape_xml(&layout.text);
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    );
    let runs = [
        (
            layout.x + SHADOW_OFFSET,
            layout.baseline + SHADOW_OFFSET,
            "#ffffff",
            0.8,
        ),
        (layout.x, layout.baseline, "#000000", 1.0),
    ];
    for (x, y, fill, opacity) in runs {
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" font-family="serif" font-weight="bold" font-size="{size}" text-anchor="middle" fill="{fill}" fill-opacity="{opacity}">{text}</text>"#,
            size = layout.font_px,
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterize a caption into a transparent, canvas-sized premultiplied RGBA8 layer.
pub fn render_caption_layer(
    canvas: Canvas,
    layout: &CaptionLayout,
    fonts: &CaptionFonts,
) -> ArwahResult<Vec<u8>> {
    let svg = caption_svg(canvas, layout);
    let tree = usvg::Tree::from_str(&svg, &fonts.svg_options())
        .map_err(|e| ArwahError::validation(format!("caption svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| ArwahError::validation("failed to allocate caption pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.take())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
