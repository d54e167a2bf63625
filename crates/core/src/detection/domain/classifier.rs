use image::GrayImage;

use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::bounding_box::BoundingBox;

pub type ClassifierError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque object detector operating on intensity images.
///
/// Handles are loaded once and then only read, so implementations must be
/// shareable across the eye-search workers.
pub trait Classifier: Send + Sync {
    /// Returns boxes in `image` coordinates, in the detector's own order.
    fn detect(
        &self,
        image: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<BoundingBox>, ClassifierError>;
}
