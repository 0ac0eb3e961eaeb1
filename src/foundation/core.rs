use crate::foundation::error::{ArwahError, ArwahResult};

pub use kurbo::{Point, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Smaller of the two dimensions.
    pub fn min_side(self) -> u32 {
        self.width.min(self.height)
    }

    pub(crate) fn byte_len(self) -> ArwahResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ArwahError::validation("canvas buffer size overflow"))
    }
}

/// Decoded raster, straight-alpha RGBA8, tightly packed, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8 bytes.
    pub rgba8: Vec<u8>,
}

/// The user-supplied portrait.
pub type SourcePhoto = RasterImage;

/// The bundled card background; its size is the output size.
pub type TemplateImage = RasterImage;

impl RasterImage {
    /// Wrap raw RGBA8 bytes, checking the buffer length against the dimensions.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> ArwahResult<Self> {
        if width == 0 || height == 0 {
            return Err(ArwahError::validation("raster dimensions must be > 0"));
        }
        let expected = Canvas { width, height }.byte_len()?;
        if rgba8.len() != expected {
            return Err(ArwahError::validation(format!(
                "raster byte length {} does not match {width}x{height}x4",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    /// A raster filled with a single straight-alpha colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ArwahResult<Self> {
        let len = Canvas { width, height }.byte_len()? / 4;
        Self::new(width, height, rgba.repeat(len))
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Borrowed `image` view over the pixel bytes, for cropping without a copy.
    pub fn view(&self) -> ArwahResult<image::ImageBuffer<image::Rgba<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.rgba8.as_slice())
            .ok_or_else(|| ArwahError::validation("raster buffer does not match dimensions"))
    }
}

impl From<image::RgbaImage> for RasterImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: img.into_raw(),
        }
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba8_len", &self.rgba8.len())
            .finish()
    }
}

/// Convert straight-alpha RGBA8 into premultiplied RGBA8.
pub fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
    [premul(px[0]), premul(px[1]), premul(px[2]), px[3]]
}

/// Inverse of [`premultiply`], rounding to nearest.
pub fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}
