use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{
    VideoCapture, CAP_ANY, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH,
};

use crate::shared::camera_properties::CameraProperties;
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::video::domain::camera::Camera;

use super::opencv_convert::bgr_mat_to_frame;

/// Webcam capture through OpenCV's `videoio` backend.
pub struct OpencvCamera {
    capture: Option<VideoCapture>,
    buffer: Mat,
}

impl OpencvCamera {
    pub fn new() -> Self {
        Self {
            capture: None,
            buffer: Mat::default(),
        }
    }
}

impl Default for OpencvCamera {
    fn default() -> Self {
        Self::new()
    }
}

fn fatal(index: i32) -> impl Fn(opencv::Error) -> CaptureError {
    move |e| CaptureError::CaptureFatal {
        index,
        reason: e.to_string(),
    }
}

impl Camera for OpencvCamera {
    fn open(
        &mut self,
        index: i32,
        requested: &CameraProperties,
    ) -> Result<CameraProperties, CaptureError> {
        let mut capture = VideoCapture::new(index, CAP_ANY).map_err(fatal(index))?;
        if !capture.is_opened().map_err(fatal(index))? {
            return Err(CaptureError::CaptureFatal {
                index,
                reason: "device could not be opened".to_string(),
            });
        }

        // Requests are hints; unsupported properties are silently ignored.
        for (prop, value) in [
            (CAP_PROP_FRAME_WIDTH, requested.width as f64),
            (CAP_PROP_FRAME_HEIGHT, requested.height as f64),
            (CAP_PROP_FPS, requested.fps),
        ] {
            if !capture.set(prop, value).map_err(fatal(index))? {
                log::debug!("Camera {index} ignored property {prop} = {value}");
            }
        }

        let negotiated = CameraProperties {
            width: capture.get(CAP_PROP_FRAME_WIDTH).map_err(fatal(index))? as u32,
            height: capture.get(CAP_PROP_FRAME_HEIGHT).map_err(fatal(index))? as u32,
            fps: capture.get(CAP_PROP_FPS).map_err(fatal(index))?,
        };
        self.capture = Some(capture);
        Ok(negotiated)
    }

    fn read(&mut self) -> Result<Frame, CaptureError> {
        let capture = self
            .capture
            .as_mut()
            .ok_or_else(|| CaptureError::CaptureTransient("camera not opened".to_string()))?;

        let grabbed = capture
            .read(&mut self.buffer)
            .map_err(|e| CaptureError::CaptureTransient(e.to_string()))?;
        if !grabbed || self.buffer.empty() {
            return Err(CaptureError::CaptureTransient(
                "device returned no frame".to_string(),
            ));
        }
        bgr_mat_to_frame(&self.buffer).map_err(|e| CaptureError::CaptureTransient(e.to_string()))
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if let Err(e) = capture.release() {
                log::warn!("Failed to release camera: {e}");
            }
        }
    }
}
