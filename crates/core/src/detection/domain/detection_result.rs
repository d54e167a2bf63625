use crate::shared::bounding_box::BoundingBox;

/// Faces and eyes found in one frame, in full-resolution coordinates.
///
/// Eyes are grouped by the face they were found in (face order first,
/// classifier order within a face) but carry no explicit link to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    pub faces: Vec<BoundingBox>,
    pub eyes: Vec<BoundingBox>,
}

impl DetectionResult {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn eye_count(&self) -> usize {
        self.eyes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.eyes.is_empty()
    }
}
