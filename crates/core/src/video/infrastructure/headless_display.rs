use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_display::FrameDisplay;

/// Display that presents nothing and never reports a key.
///
/// Used when no window system is available; the session then ends only on
/// interruption or fault.
#[derive(Default)]
pub struct HeadlessDisplay;

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl FrameDisplay for HeadlessDisplay {
    fn show(&mut self, _frame: &Frame) -> Result<(), CaptureError> {
        Ok(())
    }

    fn poll_key(&mut self, _timeout_ms: i32) -> Result<Option<char>, CaptureError> {
        Ok(None)
    }

    fn close(&mut self) {}
}
