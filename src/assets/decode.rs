use std::path::Path;

use crate::foundation::{
    core::RasterImage,
    error::{ArwahError, ArwahResult},
};

/// Decode an encoded image (JPEG, PNG, ...) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> ArwahResult<RasterImage> {
    if bytes.is_empty() {
        return Err(ArwahError::decode("input is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ArwahError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ArwahError::decode("image has zero width or height"));
    }
    Ok(RasterImage::from(rgba))
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> ArwahResult<RasterImage> {
    let bytes = std::fs::read(path)?;
    let img = decode_image(&bytes)
        .map_err(|e| ArwahError::decode(format!("'{}': {e}", path.display())))?;
    tracing::debug!(
        path = %path.display(),
        width = img.width,
        height = img.height,
        "decoded image"
    );
    Ok(img)
}
