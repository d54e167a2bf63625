use std::path::PathBuf;

use crate::shared::camera_properties::CameraProperties;
use crate::shared::cascade_resolver::{resolve, CascadeResolveError};
use crate::shared::constants::{EYE_CASCADE_FILE, FACE_CASCADE_FILE};
use crate::shared::error::CaptureError;
use crate::video::domain::camera::Camera;

/// Outcome of a setup check. Nothing here is fatal by itself; the caller
/// decides what to do with each part.
#[derive(Debug)]
pub struct SetupReport {
    pub face_cascade: Result<PathBuf, CascadeResolveError>,
    pub eye_cascade: Result<PathBuf, CascadeResolveError>,
    pub camera: Result<CameraProperties, CaptureError>,
}

impl SetupReport {
    /// Both cascades resolved. A camera that fails to open may just be
    /// busy, so it does not count against readiness.
    pub fn is_ready(&self) -> bool {
        self.face_cascade.is_ok() && self.eye_cascade.is_ok()
    }
}

/// Checks that cascade files can be found and the camera opens, without
/// starting a capture session.
pub struct VerifySetupUseCase {
    camera: Box<dyn Camera>,
    search_dirs: Vec<PathBuf>,
}

impl VerifySetupUseCase {
    pub fn new(camera: Box<dyn Camera>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            camera,
            search_dirs,
        }
    }

    pub fn execute(&mut self, camera_index: i32, requested: &CameraProperties) -> SetupReport {
        let face_cascade = resolve(FACE_CASCADE_FILE, &self.search_dirs);
        let eye_cascade = resolve(EYE_CASCADE_FILE, &self.search_dirs);

        let camera = self.camera.open(camera_index, requested);
        self.camera.release();

        SetupReport {
            face_cascade,
            eye_cascade,
            camera,
        }
    }
}
