use image::GrayImage;

use crate::detection::domain::classifier::{Classifier, ClassifierError};
use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::eye_search::{search_face, EyeSearch};
use crate::shared::bounding_box::BoundingBox;

type FaceEyes = (usize, Result<Vec<BoundingBox>, ClassifierError>);

/// Spreads per-face eye searches over a fixed number of scoped workers.
///
/// Layout: `faces → job channel → workers → result channel → reorder`
///
/// Results are reassembled by face index, so the output is identical to
/// [`SequentialEyeSearch`](crate::detection::domain::eye_search::SequentialEyeSearch).
pub struct ThreadedEyeSearch {
    workers: usize,
}

impl ThreadedEyeSearch {
    pub fn new(workers: usize) -> Result<Self, &'static str> {
        if workers < 1 {
            return Err("workers must be >= 1");
        }
        Ok(Self { workers })
    }
}

impl EyeSearch for ThreadedEyeSearch {
    fn search(
        &self,
        gray: &GrayImage,
        faces: &[BoundingBox],
        classifier: &dyn Classifier,
        params: &DetectionParams,
    ) -> Result<Vec<BoundingBox>, ClassifierError> {
        if faces.len() <= 1 || self.workers == 1 {
            let mut eyes = Vec::new();
            for face in faces {
                eyes.extend(search_face(gray, face, classifier, params)?);
            }
            return Ok(eyes);
        }

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, BoundingBox)>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<FaceEyes>();
        for job in faces.iter().copied().enumerate() {
            // Receiver outlives this loop; send cannot fail.
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        std::thread::scope(|scope| {
            for _ in 0..self.workers.min(faces.len()) {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (index, face) in job_rx {
                        let found = search_face(gray, &face, classifier, params);
                        if result_tx.send((index, found)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut per_face: Vec<Option<Vec<BoundingBox>>> = vec![None; faces.len()];
        for (index, found) in result_rx {
            per_face[index] = Some(found?);
        }
        Ok(per_face.into_iter().flatten().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::detection_params::EYE_PARAMS;
    use crate::detection::domain::eye_search::SequentialEyeSearch;
    use crate::detection::infrastructure::handle_pool::HandlePool;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    /// Returns two eyes whose position encodes the crop size, sleeping
    /// longer for small crops so completion order differs from face order.
    struct SizeEncodingClassifier {
        calls: AtomicUsize,
    }

    impl Classifier for SizeEncodingClassifier {
        fn detect(
            &self,
            image: &GrayImage,
            _params: &DetectionParams,
        ) -> Result<Vec<BoundingBox>, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let w = image.width() as i32;
            std::thread::sleep(Duration::from_millis((200 - w.min(200)) as u64 / 20));
            Ok(vec![
                BoundingBox::new(1, 1, w / 4, w / 4),
                BoundingBox::new(w / 2, 1, w / 4, w / 4),
            ])
        }
    }

    struct FailOnSmallCrop;

    impl Classifier for FailOnSmallCrop {
        fn detect(
            &self,
            image: &GrayImage,
            _params: &DetectionParams,
        ) -> Result<Vec<BoundingBox>, ClassifierError> {
            if image.width() < 50 {
                return Err("crop too small".into());
            }
            Ok(vec![])
        }
    }

    /// One pooled handle per worker; each call holds its handle until
    /// every worker is inside a call at the same time.
    struct PooledRendezvousClassifier {
        handles: HandlePool<()>,
        inside: Barrier,
    }

    impl Classifier for PooledRendezvousClassifier {
        fn detect(
            &self,
            _image: &GrayImage,
            _params: &DetectionParams,
        ) -> Result<Vec<BoundingBox>, ClassifierError> {
            self.handles.with(|_| self.inside.wait())?;
            Ok(vec![BoundingBox::new(2, 2, 6, 6)])
        }
    }

    fn faces() -> Vec<BoundingBox> {
        vec![
            BoundingBox::new(0, 0, 40, 40),
            BoundingBox::new(100, 0, 160, 160),
            BoundingBox::new(300, 200, 80, 80),
            BoundingBox::new(400, 0, 120, 120),
            BoundingBox::new(10, 300, 60, 60),
        ]
    }

    #[test]
    fn test_zero_workers_errors() {
        assert!(ThreadedEyeSearch::new(0).is_err());
    }

    #[test]
    fn test_matches_sequential_ordering() {
        let gray = GrayImage::new(640, 480);
        let classifier = SizeEncodingClassifier {
            calls: AtomicUsize::new(0),
        };

        let expected = SequentialEyeSearch
            .search(&gray, &faces(), &classifier, &EYE_PARAMS)
            .unwrap();
        let threaded = ThreadedEyeSearch::new(3)
            .unwrap()
            .search(&gray, &faces(), &classifier, &EYE_PARAMS)
            .unwrap();

        assert_eq!(threaded, expected);
        assert_eq!(threaded.len(), 10);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_pooled_classifier_searches_faces_concurrently() {
        let gray = GrayImage::new(640, 480);
        let classifier = PooledRendezvousClassifier {
            handles: HandlePool::new(vec![(); 4]).unwrap(),
            inside: Barrier::new(4),
        };
        let four = &faces()[..4];

        let eyes = ThreadedEyeSearch::new(4)
            .unwrap()
            .search(&gray, four, &classifier, &EYE_PARAMS)
            .unwrap();

        let origins: Vec<(i32, i32)> = eyes.iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(origins, vec![(2, 2), (102, 2), (302, 202), (402, 2)]);
    }

    #[test]
    fn test_more_workers_than_faces() {
        let gray = GrayImage::new(640, 480);
        let classifier = SizeEncodingClassifier {
            calls: AtomicUsize::new(0),
        };
        let two = &faces()[..2];

        let eyes = ThreadedEyeSearch::new(8)
            .unwrap()
            .search(&gray, two, &classifier, &EYE_PARAMS)
            .unwrap();

        assert_eq!(eyes.len(), 4);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_faces() {
        let gray = GrayImage::new(64, 64);
        let classifier = SizeEncodingClassifier {
            calls: AtomicUsize::new(0),
        };
        let eyes = ThreadedEyeSearch::new(4)
            .unwrap()
            .search(&gray, &[], &classifier, &EYE_PARAMS)
            .unwrap();
        assert!(eyes.is_empty());
    }

    #[test]
    fn test_worker_error_propagates() {
        let gray = GrayImage::new(640, 480);
        let result = ThreadedEyeSearch::new(2)
            .unwrap()
            .search(&gray, &faces(), &FailOnSmallCrop, &EYE_PARAMS);
        assert!(result.is_err());
    }
}
