use std::io::Cursor;

use crate::foundation::{
    core::RasterImage,
    error::{ArwahError, ArwahResult},
};

/// A finished card, PNG encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct CompositedOutput {
    pub width: u32,
    pub height: u32,
    /// PNG file bytes.
    pub png: Vec<u8>,
}

impl std::fmt::Debug for CompositedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositedOutput")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_len", &self.png.len())
            .finish()
    }
}

/// Encode a straight-alpha raster as PNG.
pub fn encode_png(img: &RasterImage) -> ArwahResult<CompositedOutput> {
    let mut png = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut png),
        &img.rgba8,
        img.width,
        img.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ArwahError::encode(format!("png: {e}")))?;
    if png.is_empty() {
        return Err(ArwahError::encode("png encoder produced no data"));
    }
    Ok(CompositedOutput {
        width: img.width,
        height: img.height,
        png,
    })
}

/// Download name for a card: `<prefix>-<caption or "card">.png`.
pub fn output_file_name(prefix: &str, caption: Option<&str>) -> String {
    let stem = caption
        .map(sanitize_file_stem)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "card".to_string());
    format!("{prefix}-{stem}.png")
}

/// Make caption text safe to use as part of a file name.
pub fn sanitize_file_stem(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push('-');
            pending_space = false;
        }
        match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            c if c.is_control() => out.push('_'),
            c => out.push(c),
        }
    }
    out.trim_matches('.').to_string()
}
