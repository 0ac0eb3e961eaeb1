use image::{
    GenericImageView as _,
    imageops::{self, FilterType},
};

use crate::foundation::{
    core::{RasterImage, Rect},
    error::{ArwahError, ArwahResult},
};

/// Cover-fit placement of a source raster into a square of `side` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform source-to-crop scale, `max(side / src_w, side / src_h)`.
    pub scale: f64,
    /// Side of the output square in pixels.
    pub side: u32,
    /// Region of the source (in source pixels) that ends up visible.
    pub window: Rect,
}

impl CoverFit {
    pub fn compute(src_width: u32, src_height: u32, side: u32) -> ArwahResult<Self> {
        if src_width == 0 || src_height == 0 || side == 0 {
            return Err(ArwahError::validation(
                "cover fit needs non-empty source and target",
            ));
        }
        let d = f64::from(side);
        let scale = (d / f64::from(src_width)).max(d / f64::from(src_height));

        // After scaling, the shorter source axis spans the square exactly, so the visible
        // window is the centred min-side square.
        let (x0, y0, s) = centred_square(src_width, src_height);
        let window = Rect::new(
            f64::from(x0),
            f64::from(y0),
            f64::from(x0 + s),
            f64::from(y0 + s),
        );
        Ok(Self {
            scale,
            side,
            window,
        })
    }
}

fn centred_square(width: u32, height: u32) -> (u32, u32, u32) {
    let s = width.min(height);
    ((width - s) / 2, (height - s) / 2, s)
}

/// Scale `source` uniformly so it covers a `side` x `side` square, then centre-crop to it.
pub fn cover_fit(source: &RasterImage, side: u32) -> ArwahResult<RasterImage> {
    let fit = CoverFit::compute(source.width, source.height, side)?;
    let Rect { x0, y0, x1, .. } = fit.window;
    let s = (x1 - x0) as u32;

    let view = source.view()?;
    let square = imageops::crop_imm(&view, x0 as u32, y0 as u32, s, s);
    let out = if s == side {
        image::RgbaImage::from_fn(s, s, |x, y| square.get_pixel(x, y))
    } else {
        imageops::resize(&*square, side, side, FilterType::Triangle)
    };
    Ok(RasterImage::from(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_scale_is_driven_by_height() {
        let fit = CoverFit::compute(4000, 3000, 432).unwrap();
        assert!((fit.scale - 0.144).abs() < 1e-9);
        assert_eq!(fit.window, Rect::new(500.0, 0.0, 3500.0, 3000.0));
    }

    #[test]
    fn portrait_scale_is_driven_by_width() {
        let fit = CoverFit::compute(300, 900, 600).unwrap();
        assert!((fit.scale - 2.0).abs() < 1e-9);
        assert_eq!(fit.window, Rect::new(0.0, 300.0, 300.0, 600.0));
    }

    #[test]
    fn window_is_independent_of_target_side() {
        let small = CoverFit::compute(4000, 3000, 432).unwrap();
        let large = CoverFit::compute(4000, 3000, 600).unwrap();
        assert_eq!(small.window, large.window);
        assert!(large.scale > small.scale);
    }

    #[test]
    fn output_is_square_and_fully_opaque() {
        let src = RasterImage::solid(37, 11, [10, 200, 30, 255]).unwrap();
        let out = cover_fit(&src, 24).unwrap();
        assert_eq!((out.width, out.height), (24, 24));
        assert!(out.rgba8.chunks_exact(4).all(|px| px == [10, 200, 30, 255]));
    }

    #[test]
    fn crop_keeps_the_centre_of_the_source() {
        // Left third red, middle third green, right third blue.
        let mut src = image::RgbaImage::new(9, 3);
        for (x, _, px) in src.enumerate_pixels_mut() {
            *px = match x {
                0..=2 => image::Rgba([255, 0, 0, 255]),
                3..=5 => image::Rgba([0, 255, 0, 255]),
                _ => image::Rgba([0, 0, 255, 255]),
            };
        }
        let out = cover_fit(&RasterImage::from(src), 3).unwrap();
        assert!(out.rgba8.chunks_exact(4).all(|px| px == [0, 255, 0, 255]));
    }

    #[test]
    fn zero_side_is_rejected() {
        let src = RasterImage::solid(4, 4, [0, 0, 0, 255]).unwrap();
        assert!(cover_fit(&src, 0).is_err());
    }
}
