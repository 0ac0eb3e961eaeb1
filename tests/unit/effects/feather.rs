use super::*;

fn opaque_square(side: u32) -> Vec<u8> {
    [128u8, 128, 128, 255].repeat((side * side) as usize)
}

fn partial_alpha_count(rgba: &[u8]) -> usize {
    rgba.chunks_exact(4)
        .filter(|px| px[3] != 0 && px[3] != 255)
        .count()
}

#[test]
fn radii_follow_feather_fraction() {
    let m = FeatherMask::new(216.0, 0.3);
    assert!((m.inner - 183.6).abs() < 1e-9);
    assert_eq!(m.outer, 216.0);

    let full = FeatherMask::new(100.0, 1.0);
    assert!((full.inner - 50.0).abs() < 1e-9);

    let hard = FeatherMask::new(100.0, 0.0);
    assert_eq!(hard.inner, hard.outer);
    assert_eq!(hard.band_width(), 0.0);
}

#[test]
fn inner_radius_never_goes_negative() {
    let m = FeatherMask::new(10.0, 3.0);
    assert_eq!(m.inner, 0.0);
    assert_eq!(m.alpha_at(0.0), 1.0);
}

#[test]
fn alpha_is_linear_in_the_band() {
    let m = FeatherMask::new(100.0, 1.0);
    assert_eq!(m.alpha_at(50.0), 1.0);
    assert!((m.alpha_at(75.0) - 0.5).abs() < 1e-12);
    assert_eq!(m.alpha_at(100.0), 0.0);
    assert_eq!(m.alpha_at(140.0), 0.0);
}

#[test]
fn zero_feather_is_a_binary_mask() {
    let side = 64;
    let mut px = opaque_square(side);
    apply_feather(&mut px, side, FeatherMask::new(32.0, 0.0)).unwrap();
    assert_eq!(partial_alpha_count(&px), 0);
    // Centre opaque, corner cleared.
    assert_eq!(px[((32 * side + 32) * 4 + 3) as usize], 255);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
}

#[test]
fn full_feather_band_is_wider_than_half() {
    let side = 128;
    let mut half = opaque_square(side);
    let mut full = opaque_square(side);
    apply_feather(&mut half, side, FeatherMask::new(64.0, 0.5)).unwrap();
    apply_feather(&mut full, side, FeatherMask::new(64.0, 1.0)).unwrap();

    assert!(FeatherMask::new(64.0, 1.0).band_width() > FeatherMask::new(64.0, 0.5).band_width());
    assert!(partial_alpha_count(&full) > partial_alpha_count(&half));
}

#[test]
fn core_stays_opaque() {
    let side = 100;
    let mask = FeatherMask::new(50.0, 0.8);
    let mut px = opaque_square(side);
    apply_feather(&mut px, side, mask).unwrap();

    let c = f64::from(side) / 2.0;
    for (i, p) in px.chunks_exact(4).enumerate() {
        let x = (i % side as usize) as f64 + 0.5;
        let y = (i / side as usize) as f64 + 0.5;
        if (x - c).hypot(y - c) <= mask.inner {
            assert_eq!(p[3], 255);
        }
    }
}

#[test]
fn wrong_buffer_length_is_rejected() {
    let mut px = vec![0u8; 15];
    assert!(apply_feather(&mut px, 2, FeatherMask::new(1.0, 0.0)).is_err());
}
