pub const FACE_CASCADE_FILE: &str = "haarcascade_frontalface_default.xml";
pub const EYE_CASCADE_FILE: &str = "haarcascade_eye.xml";

/// System-wide cascade directory used by distribution OpenCV packages.
pub const SYSTEM_CASCADE_DIR: &str = "/usr/share/opencv4/haarcascades";

/// Install location of the cascades shipped with a source-built OpenCV.
pub const BUNDLED_CASCADE_DIR: &str = "/usr/local/share/opencv4/haarcascades";

/// Overrides [`BUNDLED_CASCADE_DIR`] when set.
pub const BUNDLED_CASCADE_DIR_ENV: &str = "OPENCV_HAARCASCADES_DIR";

pub const SCREENSHOT_PATH: &str = "detection_screenshot.jpg";
pub const WINDOW_TITLE: &str = "Face & Eye Detection System";

pub const DEFAULT_CAMERA_INDEX: i32 = 0;
pub const DEFAULT_CAPTURE_WIDTH: u32 = 640;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 480;
pub const DEFAULT_CAPTURE_FPS: f64 = 30.0;

/// Linear scale applied before face detection (320x240 from 640x480).
pub const DEFAULT_DETECTION_SCALE: f64 = 0.5;

/// Rolling window size for the FPS estimate.
pub const FPS_WINDOW_SIZE: usize = 30;

/// Frames between periodic performance lines.
pub const PERFORMANCE_REPORT_INTERVAL: u64 = 100;

/// Key poll timeout per loop iteration.
pub const KEY_POLL_MS: i32 = 1;

/// Faces shown in the overlay count, independent of how many were found.
pub const MAX_DISPLAYED_FACES: usize = 5;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
