use image::GrayImage;

use crate::detection::domain::classifier::{Classifier, ClassifierError};
use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::bounding_box::BoundingBox;

/// Runs the eye classifier inside each face box of a full-resolution
/// intensity image.
///
/// Implementations must return eyes grouped by face in `faces` order, and
/// in classifier order within each face.
pub trait EyeSearch: Send + Sync {
    fn search(
        &self,
        gray: &GrayImage,
        faces: &[BoundingBox],
        classifier: &dyn Classifier,
        params: &DetectionParams,
    ) -> Result<Vec<BoundingBox>, ClassifierError>;
}

/// Searches faces one after another on the calling thread.
pub struct SequentialEyeSearch;

impl EyeSearch for SequentialEyeSearch {
    fn search(
        &self,
        gray: &GrayImage,
        faces: &[BoundingBox],
        classifier: &dyn Classifier,
        params: &DetectionParams,
    ) -> Result<Vec<BoundingBox>, ClassifierError> {
        let mut eyes = Vec::new();
        for face in faces {
            eyes.extend(search_face(gray, face, classifier, params)?);
        }
        Ok(eyes)
    }
}

/// Eyes inside a single face, in frame coordinates.
///
/// The crop is the face box intersected with the image; eyes reported
/// outside the crop are clipped back to it. Degenerate faces yield nothing
/// without consulting the classifier.
pub fn search_face(
    gray: &GrayImage,
    face: &BoundingBox,
    classifier: &dyn Classifier,
    params: &DetectionParams,
) -> Result<Vec<BoundingBox>, ClassifierError> {
    let image_bounds = BoundingBox::new(0, 0, gray.width() as i32, gray.height() as i32);
    let roi = face.clamped_to(&image_bounds);
    if roi.is_empty() {
        return Ok(Vec::new());
    }

    let crop = image::imageops::crop_imm(
        gray,
        roi.x as u32,
        roi.y as u32,
        roi.width as u32,
        roi.height as u32,
    )
    .to_image();

    let eyes = classifier
        .detect(&crop, params)?
        .into_iter()
        .map(|e| e.translated(roi.x, roi.y).clamped_to(&roi))
        .filter(|e| !e.is_empty())
        .collect();
    Ok(eyes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the crop sizes it was given and returns fixed local boxes.
    struct RecordingClassifier {
        boxes: Vec<BoundingBox>,
        crops: Mutex<Vec<(u32, u32)>>,
    }

    impl RecordingClassifier {
        fn new(boxes: Vec<BoundingBox>) -> Self {
            Self {
                boxes,
                crops: Mutex::new(Vec::new()),
            }
        }
    }

    impl Classifier for RecordingClassifier {
        fn detect(
            &self,
            image: &GrayImage,
            _params: &DetectionParams,
        ) -> Result<Vec<BoundingBox>, ClassifierError> {
            self.crops.lock().unwrap().push(image.dimensions());
            Ok(self.boxes.clone())
        }
    }

    const PARAMS: DetectionParams = crate::detection::domain::detection_params::EYE_PARAMS;

    #[test]
    fn test_search_face_translates_to_frame_space() {
        let gray = GrayImage::new(640, 480);
        let classifier = RecordingClassifier::new(vec![BoundingBox::new(10, 20, 15, 15)]);
        let face = BoundingBox::new(100, 50, 120, 120);

        let eyes = search_face(&gray, &face, &classifier, &PARAMS).unwrap();

        assert_eq!(eyes, vec![BoundingBox::new(110, 70, 15, 15)]);
        assert_eq!(*classifier.crops.lock().unwrap(), vec![(120, 120)]);
    }

    #[test]
    fn test_search_face_clips_eyes_to_face() {
        let gray = GrayImage::new(640, 480);
        let classifier = RecordingClassifier::new(vec![BoundingBox::new(110, 110, 30, 30)]);
        let face = BoundingBox::new(100, 50, 120, 120);

        let eyes = search_face(&gray, &face, &classifier, &PARAMS).unwrap();

        assert_eq!(eyes, vec![BoundingBox::new(210, 160, 10, 10)]);
        assert!(face.contains(&eyes[0]));
    }

    #[test]
    fn test_search_face_crops_overhanging_face() {
        let gray = GrayImage::new(200, 100);
        let classifier = RecordingClassifier::new(vec![]);
        let face = BoundingBox::new(150, 60, 100, 100);

        search_face(&gray, &face, &classifier, &PARAMS).unwrap();

        assert_eq!(*classifier.crops.lock().unwrap(), vec![(50, 40)]);
    }

    #[test]
    fn test_search_face_skips_degenerate_face() {
        let gray = GrayImage::new(100, 100);
        let classifier = RecordingClassifier::new(vec![BoundingBox::new(0, 0, 5, 5)]);
        let face = BoundingBox::new(10, 10, 0, 40);

        let eyes = search_face(&gray, &face, &classifier, &PARAMS).unwrap();

        assert!(eyes.is_empty());
        assert!(classifier.crops.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sequential_groups_eyes_by_face() {
        let gray = GrayImage::new(640, 480);
        let classifier = RecordingClassifier::new(vec![
            BoundingBox::new(5, 5, 10, 10),
            BoundingBox::new(40, 5, 10, 10),
        ]);
        let faces = [
            BoundingBox::new(300, 200, 80, 80),
            BoundingBox::new(0, 0, 80, 80),
        ];

        let eyes = SequentialEyeSearch
            .search(&gray, &faces, &classifier, &PARAMS)
            .unwrap();

        assert_eq!(
            eyes,
            vec![
                BoundingBox::new(305, 205, 10, 10),
                BoundingBox::new(340, 205, 10, 10),
                BoundingBox::new(5, 5, 10, 10),
                BoundingBox::new(40, 5, 10, 10),
            ]
        );
    }

    #[test]
    fn test_sequential_no_faces_never_calls_classifier() {
        let gray = GrayImage::new(64, 64);
        let classifier = RecordingClassifier::new(vec![BoundingBox::new(0, 0, 5, 5)]);

        let eyes = SequentialEyeSearch
            .search(&gray, &[], &classifier, &PARAMS)
            .unwrap();

        assert!(eyes.is_empty());
        assert!(classifier.crops.lock().unwrap().is_empty());
    }
}
