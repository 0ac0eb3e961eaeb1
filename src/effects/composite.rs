use crate::foundation::{
    core::{premultiply, unpremultiply},
    error::{ArwahError, ArwahResult},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied RGBA8.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Source-over of a premultiplied `src` onto a straight-alpha `dst`, returning straight alpha.
///
/// A fully transparent `src` leaves `dst` bit-identical.
pub fn over_straight(dst: [u8; 4], src: PremulRgba8) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    unpremultiply(over(premultiply(dst), src))
}

/// Blend a premultiplied `src` over an equally sized straight-alpha `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ArwahResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ArwahError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over_straight([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Placement of a smaller layer on a larger one.
#[derive(Clone, Copy, Debug)]
pub struct LayerPlacement {
    pub dst_width: u32,
    pub dst_height: u32,
    pub src_width: u32,
    pub src_height: u32,
    /// Top-left of the layer in destination pixels; may be negative.
    pub x: i64,
    pub y: i64,
}

/// Blend premultiplied `src` over straight-alpha `dst` at `placement`, clipping whatever falls
/// outside `dst`.
pub fn over_at(dst: &mut [u8], src: &[u8], placement: LayerPlacement) -> ArwahResult<()> {
    let LayerPlacement {
        dst_width,
        dst_height,
        src_width,
        src_height,
        x,
        y,
    } = placement;
    let dst_len = (dst_width as usize) * (dst_height as usize) * 4;
    let src_len = (src_width as usize) * (src_height as usize) * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(ArwahError::validation(
            "over_at expects buffers matching their declared dimensions",
        ));
    }

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + i64::from(src_width)).min(i64::from(dst_width));
    let y_end = (y + i64::from(src_height)).min(i64::from(dst_height));
    if x_start >= x_end || y_start >= y_end {
        return Ok(());
    }

    for dy in y_start..y_end {
        let sy = (dy - y) as usize;
        for dx in x_start..x_end {
            let sx = (dx - x) as usize;
            let si = (sy * src_width as usize + sx) * 4;
            let di = (dy as usize * dst_width as usize + dx as usize) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over_straight(d, s));
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
