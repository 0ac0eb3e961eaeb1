use super::*;
use crate::{foundation::core::RasterImage, text::fonts::CaptionFonts};

fn compositor() -> Arc<Compositor> {
    let template = RasterImage::solid(64, 80, [40, 60, 80, 255]).unwrap();
    Arc::new(Compositor::new(template, CaptionFonts::empty()))
}

fn photo() -> Arc<SourcePhoto> {
    Arc::new(RasterImage::solid(40, 30, [200, 10, 10, 255]).unwrap())
}

fn params(size_pct: f64) -> CompositionParams {
    CompositionParams::from_percent(size_pct, 30.0, None).unwrap()
}

#[tokio::test(start_paused = true)]
async fn burst_of_changes_renders_once() {
    let mut driver = PreviewDriver::new(compositor(), Duration::from_millis(100)).unwrap();
    let mut rx = driver.subscribe();

    for size in [10.0, 20.0, 30.0] {
        driver.schedule(photo(), params(size));
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
    assert_eq!(driver.renders_completed(), 0);

    rx.changed().await.unwrap();
    assert_eq!(driver.renders_completed(), 1);

    let state = rx.borrow().clone();
    assert_eq!(state.generation(), Some(3));
    let output = state.output().expect("preview ready");
    assert_eq!((output.width, output.height), (64, 80));
}

#[tokio::test(start_paused = true)]
async fn nothing_fires_before_the_delay() {
    let mut driver = PreviewDriver::new(compositor(), Duration::from_millis(100)).unwrap();
    driver.schedule(photo(), params(18.0));

    tokio::time::sleep(Duration::from_millis(99)).await;
    assert!(matches!(driver.current(), PreviewState::Empty));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(driver.current().output().is_some());
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_pending_and_releases_preview() {
    let mut driver = PreviewDriver::new(compositor(), Duration::from_millis(100)).unwrap();
    driver.schedule(photo(), params(18.0));
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(driver.current().output().is_some());

    driver.schedule(photo(), params(25.0));
    driver.clear();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(matches!(driver.current(), PreviewState::Empty));
    assert_eq!(driver.renders_completed(), 1);
}

#[tokio::test(start_paused = true)]
async fn later_schedule_replaces_earlier_output() {
    let mut driver = PreviewDriver::new(compositor(), Duration::from_millis(100)).unwrap();
    driver.schedule(photo(), params(10.0));
    tokio::time::sleep(Duration::from_millis(150)).await;
    let first = driver.current().output().cloned().unwrap();

    driver.schedule(photo(), params(30.0));
    tokio::time::sleep(Duration::from_millis(150)).await;
    let second = driver.current().output().cloned().unwrap();

    assert_eq!(driver.current().generation(), Some(2));
    assert_ne!(first.png, second.png);
}

#[test]
fn new_without_runtime_fails() {
    assert!(PreviewDriver::new(compositor(), Duration::from_millis(100)).is_err());
}
