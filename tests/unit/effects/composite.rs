use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [0, 0, 0, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn half_alpha_blends_with_background_not_white() {
    // 50% black over opaque red stays a darkened red.
    let dst = [255, 0, 0, 255];
    let src = [0, 0, 0, 128];
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 127);
    assert_eq!(out[1], 0);
    assert_eq!(out[2], 0);
}

#[test]
fn straight_destination_untouched_by_clear_source() {
    let dst = [200, 100, 50, 3];
    assert_eq!(over_straight(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn straight_destination_takes_opaque_source() {
    assert_eq!(over_straight([200, 100, 50, 3], [9, 8, 7, 255]), [9, 8, 7, 255]);
}

#[test]
fn over_in_place_keeps_translucent_pixels_outside_the_layer() {
    let mut dst = [200u8, 100, 50, 3, 10, 20, 30, 128].to_vec();
    let src = [0u8, 0, 0, 0, 0, 0, 0, 255];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(&dst[0..4], &[200, 100, 50, 3]);
    assert_eq!(&dst[4..8], &[0, 0, 0, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn over_at_places_and_clips() {
    let (w, h) = (4u32, 4u32);
    let mut dst = [0u8, 0, 255, 255].repeat((w * h) as usize);
    let src = [255u8, 0, 0, 255].repeat(4);

    // 2x2 layer hanging off the top-left corner: only pixel (0,0) is covered.
    over_at(
        &mut dst,
        &src,
        LayerPlacement {
            dst_width: w,
            dst_height: h,
            src_width: 2,
            src_height: 2,
            x: -1,
            y: -1,
        },
    )
    .unwrap();
    assert_eq!(&dst[0..4], &[255, 0, 0, 255]);
    assert_eq!(&dst[4..8], &[0, 0, 255, 255]);
    assert_eq!(&dst[16..20], &[0, 0, 255, 255]);
}

#[test]
fn over_at_fully_outside_is_noop() {
    let mut dst = [1u8, 2, 3, 255].repeat(4);
    let before = dst.clone();
    over_at(
        &mut dst,
        &[255u8; 4],
        LayerPlacement {
            dst_width: 2,
            dst_height: 2,
            src_width: 1,
            src_height: 1,
            x: 5,
            y: 0,
        },
    )
    .unwrap();
    assert_eq!(dst, before);
}
