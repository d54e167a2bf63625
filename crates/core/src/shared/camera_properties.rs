/// Capture properties as requested from, or reported back by, a camera.
///
/// Devices treat requests as hints; downstream coordinate math must use the
/// values read back after opening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraProperties {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl Default for CameraProperties {
    fn default() -> Self {
        use crate::shared::constants::{
            DEFAULT_CAPTURE_FPS, DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_WIDTH,
        };
        Self {
            width: DEFAULT_CAPTURE_WIDTH,
            height: DEFAULT_CAPTURE_HEIGHT,
            fps: DEFAULT_CAPTURE_FPS,
        }
    }
}
