use std::io::Cursor;
use std::time::Duration;

use super::*;
use crate::{foundation::core::RasterImage, text::fonts::CaptionFonts};

fn session() -> CardSession {
    let template = RasterImage::solid(60, 90, [230, 220, 200, 255]).unwrap();
    let compositor = Arc::new(Compositor::new(template, CaptionFonts::empty()));
    CardSession::new(compositor, &CompositorConfig::default()).unwrap()
}

fn png_photo(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([20, 40, 200, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test(start_paused = true)]
async fn parameter_changes_without_photo_do_not_render() {
    let mut s = session();
    s.set_circle_size_percent(25.0).unwrap();
    s.set_caption("Haji Ahmad");
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(matches!(s.preview(), PreviewState::Empty));
}

#[tokio::test(start_paused = true)]
async fn loading_a_photo_schedules_a_preview() {
    let mut s = session();
    s.load_photo(&png_photo(30, 20)).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let state = s.preview();
    let out = state.output().expect("preview");
    assert_eq!((out.width, out.height), (60, 90));
}

#[tokio::test(start_paused = true)]
async fn bad_photo_leaves_state_unchanged() {
    let mut s = session();
    s.load_photo(&png_photo(30, 20)).unwrap();
    let before = Arc::clone(s.photo().unwrap());

    let err = s.load_photo(b"not an image").unwrap_err();
    assert!(err.is_decode());
    assert!(Arc::ptr_eq(s.photo().unwrap(), &before));
}

#[tokio::test(start_paused = true)]
async fn out_of_range_slider_is_rejected_and_kept() {
    let mut s = session();
    assert!(s.set_circle_size_percent(45.0).is_err());
    assert!(s.set_feather_percent(-5.0).is_err());
    assert_eq!(s.params(), &CompositionParams::default());
}

#[tokio::test]
async fn generate_requires_a_photo() {
    let s = session();
    let err = s.generate().await.unwrap_err();
    assert!(matches!(err, ArwahError::Validation(_)));
}

#[tokio::test]
async fn generate_then_reset_clears_everything() {
    let mut s = session();
    s.load_photo(&png_photo(40, 40)).unwrap();
    s.set_caption("Siti Aminah");
    let out = s.generate().await.unwrap();
    assert_eq!((out.width, out.height), (60, 90));
    assert!(matches!(s.final_status(), RenderStatus::Done(_)));
    assert_eq!(s.download_name(), "tahlil-Siti-Aminah.png");

    s.reset();
    assert!(s.photo().is_none());
    assert!(matches!(s.final_status(), RenderStatus::Idle));
    assert!(matches!(s.preview(), PreviewState::Empty));
    assert_eq!(s.download_name(), "tahlil-card.png");
}

#[tokio::test]
async fn new_photo_discards_finished_card() {
    let mut s = session();
    s.load_photo(&png_photo(8, 8)).unwrap();
    s.generate().await.unwrap();
    assert!(matches!(s.final_status(), RenderStatus::Done(_)));

    s.load_photo(&png_photo(10, 10)).unwrap();
    assert!(matches!(s.final_status(), RenderStatus::Idle));
}
