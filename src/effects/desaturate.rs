/// Rec. 601 luma, rounded to nearest.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Replace RGB with luma on straight-alpha RGBA8 pixels; alpha is untouched.
pub fn desaturate_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let gray = luma(px[0], px[1], px[2]);
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}
