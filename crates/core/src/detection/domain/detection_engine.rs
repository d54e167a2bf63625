use image::imageops::FilterType;
use image::GrayImage;
use thiserror::Error;

use crate::detection::domain::classifier::{Classifier, ClassifierError};
use crate::detection::domain::detection_params::{DetectionParams, EYE_PARAMS, FACE_PARAMS};
use crate::detection::domain::detection_result::DetectionResult;
use crate::detection::domain::eye_search::{EyeSearch, SequentialEyeSearch};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::DEFAULT_DETECTION_SCALE;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("detection scale must be in (0, 1], got {0}")]
    InvalidScale(f64),
    #[error("invalid {kind} parameters: {reason}")]
    InvalidParams { kind: &'static str, reason: String },
    #[error("face classifier failed: {0}")]
    Face(#[source] ClassifierError),
    #[error("eye classifier failed: {0}")]
    Eye(#[source] ClassifierError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Linear factor applied to the frame before face detection.
    pub detection_scale: f64,
    /// Face search parameters, `min_size` in downscaled pixels.
    pub face_params: DetectionParams,
    /// Eye search parameters, `min_size` in full-resolution pixels.
    pub eye_params: DetectionParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detection_scale: DEFAULT_DETECTION_SCALE,
            face_params: FACE_PARAMS,
            eye_params: EYE_PARAMS,
        }
    }
}

/// Finds faces on a downscaled copy of each frame, then eyes inside each
/// face at full resolution.
///
/// Face boxes come back in full-resolution coordinates, clamped to the
/// frame. Eye boxes always lie inside the face they were found in.
pub struct DetectionEngine {
    face_classifier: Box<dyn Classifier>,
    eye_classifier: Box<dyn Classifier>,
    eye_search: Box<dyn EyeSearch>,
    config: EngineConfig,
}

impl DetectionEngine {
    pub fn new(
        face_classifier: Box<dyn Classifier>,
        eye_classifier: Box<dyn Classifier>,
        config: EngineConfig,
    ) -> Result<Self, DetectionError> {
        let scale = config.detection_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(DetectionError::InvalidScale(scale));
        }
        config
            .face_params
            .validate()
            .map_err(|reason| DetectionError::InvalidParams { kind: "face", reason })?;
        config
            .eye_params
            .validate()
            .map_err(|reason| DetectionError::InvalidParams { kind: "eye", reason })?;
        Ok(Self {
            face_classifier,
            eye_classifier,
            eye_search: Box::new(SequentialEyeSearch),
            config,
        })
    }

    /// Replaces the per-face eye search strategy.
    pub fn with_eye_search(mut self, eye_search: Box<dyn EyeSearch>) -> Self {
        self.eye_search = eye_search;
        self
    }

    pub fn detect(&self, frame: &Frame) -> Result<DetectionResult, DetectionError> {
        let faces = self.detect_faces(frame)?;
        if faces.is_empty() {
            return Ok(DetectionResult::default());
        }

        let gray = frame.to_luma();
        let eyes = self
            .eye_search
            .search(
                &gray,
                &faces,
                self.eye_classifier.as_ref(),
                &self.config.eye_params,
            )
            .map_err(DetectionError::Eye)?;

        Ok(DetectionResult { faces, eyes })
    }

    fn detect_faces(&self, frame: &Frame) -> Result<Vec<BoundingBox>, DetectionError> {
        let small = self.downscaled_luma(frame);
        let fx = frame.width() as f64 / small.width() as f64;
        let fy = frame.height() as f64 / small.height() as f64;
        let bounds = frame.bounds();

        let faces = self
            .face_classifier
            .detect(&small, &self.config.face_params)
            .map_err(DetectionError::Face)?
            .into_iter()
            .map(|b| b.scaled_xy(fx, fy).clamped_to(&bounds))
            .collect();
        Ok(faces)
    }

    fn downscaled_luma(&self, frame: &Frame) -> GrayImage {
        let scale = self.config.detection_scale;
        let rgb = frame.to_rgb_image();
        if scale >= 1.0 {
            return image::imageops::grayscale(&rgb);
        }
        let w = ((frame.width() as f64 * scale).round() as u32).max(1);
        let h = ((frame.height() as f64 * scale).round() as u32).max(1);
        let small = image::imageops::resize(&rgb, w, h, FilterType::Triangle);
        image::imageops::grayscale(&small)
    }
}
