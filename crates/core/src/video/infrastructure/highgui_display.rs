use opencv::highgui;

use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_display::FrameDisplay;

use super::opencv_convert::frame_to_bgr_mat;

/// A single OpenCV HighGUI window.
pub struct HighguiDisplay {
    title: String,
    open: bool,
}

impl HighguiDisplay {
    pub fn new(title: &str) -> Result<Self, CaptureError> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)
            .map_err(|e| CaptureError::Display(e.to_string()))?;
        Ok(Self {
            title: title.to_string(),
            open: true,
        })
    }
}

impl FrameDisplay for HighguiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), CaptureError> {
        let bgr = frame_to_bgr_mat(frame).map_err(|e| CaptureError::Display(e.to_string()))?;
        highgui::imshow(&self.title, &bgr).map_err(|e| CaptureError::Display(e.to_string()))
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>, CaptureError> {
        let key = highgui::wait_key(timeout_ms).map_err(|e| CaptureError::Display(e.to_string()))?;
        if key < 0 {
            return Ok(None);
        }
        Ok(Some(char::from((key & 0xFF) as u8)))
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close display: {e}");
        }
    }
}

impl Drop for HighguiDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
