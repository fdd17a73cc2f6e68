use camera::{Camera, CameraError, FolderCamera};
use image::RgbImage;

fn write_test_jpegs(dir: &std::path::Path, count: usize) {
    for i in 0..count {
        let img = RgbImage::from_pixel(16, 12, image::Rgb([i as u8 * 40, 0, 0]));
        img.save(dir.join(format!("frame{i}.jpg"))).unwrap();
    }
}

#[tokio::test]
async fn cycles_frames_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_test_jpegs(dir.path(), 2);
    let cam = FolderCamera::new(&format!("{}/*.jpg", dir.path().display())).unwrap();

    for _ in 0..3 {
        let frame = cam.grab().await.unwrap();
        assert_eq!((frame.width(), frame.height()), (16, 12));
        assert!(!frame.is_empty());
    }
}

#[tokio::test]
async fn release_invalidates_the_device() {
    let dir = tempfile::tempdir().unwrap();
    write_test_jpegs(dir.path(), 1);
    let cam = FolderCamera::new(&format!("{}/*.jpg", dir.path().display())).unwrap();

    assert!(!cam.is_released());
    cam.grab().await.unwrap();
    cam.release();
    assert!(cam.is_released());
    match cam.grab().await {
        Err(CameraError::Unavailable(_)) => {}
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[test]
fn empty_pattern_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    match FolderCamera::new(&format!("{}/*.jpg", dir.path().display())) {
        Err(CameraError::Unavailable(_)) => {}
        other => panic!("expected Unavailable, got {:?}", other.map(|_| ())),
    }
}
