use crate::shared::camera_properties::CameraProperties;
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;

/// A live frame source addressed by device index.
///
/// Implementations report a missing frame as
/// [`CaptureError::CaptureTransient`] and an unusable device as
/// [`CaptureError::CaptureFatal`].
pub trait Camera: Send {
    /// Opens the device and negotiates properties. Returns what the device
    /// actually delivers, which may differ from `requested`.
    fn open(
        &mut self,
        index: i32,
        requested: &CameraProperties,
    ) -> Result<CameraProperties, CaptureError>;

    /// Blocks until the next frame, bounded by the device's own timeout.
    fn read(&mut self) -> Result<Frame, CaptureError>;

    /// Releases the device. Safe to call on an unopened camera.
    fn release(&mut self);
}
