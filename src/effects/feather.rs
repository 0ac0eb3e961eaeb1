use crate::foundation::error::{ArwahError, ArwahResult};

/// Radial alpha falloff: opaque up to `inner`, transparent from `outer`, linear between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatherMask {
    pub inner: f64,
    pub outer: f64,
}

impl FeatherMask {
    /// Mask for a circle of `radius` with `feather` in `[0, 1]`.
    ///
    /// `feather = 1` shrinks the opaque core to half the radius; `feather = 0` is a hard edge.
    pub fn new(radius: f64, feather: f64) -> Self {
        let outer = radius.max(0.0);
        let inner = (radius * (1.0 - feather / 2.0)).clamp(0.0, outer);
        Self { inner, outer }
    }

    /// Width of the partially transparent ring.
    pub fn band_width(&self) -> f64 {
        self.outer - self.inner
    }

    /// Coverage at distance `d` from the centre, in `[0, 1]`.
    pub fn alpha_at(&self, d: f64) -> f64 {
        if d <= self.inner {
            1.0
        } else if d >= self.outer {
            0.0
        } else {
            (self.outer - d) / (self.outer - self.inner)
        }
    }
}

/// Multiply the alpha of a `side` x `side` straight-alpha RGBA8 square by `mask`, centred on the
/// square. Distances are taken from pixel centres.
pub fn apply_feather(rgba: &mut [u8], side: u32, mask: FeatherMask) -> ArwahResult<()> {
    let expected = (side as usize)
        .checked_mul(side as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ArwahError::validation("feather buffer size overflow"))?;
    if rgba.len() != expected {
        return Err(ArwahError::validation(
            "apply_feather expects a side*side*4 buffer",
        ));
    }

    let c = f64::from(side) / 2.0;
    for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
        let x = (i % side as usize) as f64 + 0.5;
        let y = (i / side as usize) as f64 + 0.5;
        let m = mask.alpha_at((x - c).hypot(y - c));
        if m >= 1.0 {
            continue;
        }
        px[3] = (f64::from(px[3]) * m).round() as u8;
        if px[3] == 0 {
            px[..3].fill(0);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/feather.rs"]
mod tests;
