use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;

/// Surface that presents annotated frames and reports key presses.
pub trait FrameDisplay: Send {
    fn show(&mut self, frame: &Frame) -> Result<(), CaptureError>;

    /// Waits up to `timeout_ms` for a key. Returns `None` when nothing was
    /// pressed.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>, CaptureError>;

    /// Tears the surface down. Safe to call more than once.
    fn close(&mut self);
}
