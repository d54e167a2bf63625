/// Multi-scale cascade search parameters.
///
/// The defaults were tuned empirically on a 640x480 webcam feed; they are
/// exposed as configuration rather than derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    /// Ratio between successive window sizes in the search pyramid.
    pub scale_factor: f64,
    /// Overlapping hits required before a candidate is accepted.
    pub min_neighbors: i32,
    /// Smallest window searched, `(width, height)` in pixels of the image
    /// handed to the classifier.
    pub min_size: (u32, u32),
}

pub const FACE_PARAMS: DetectionParams = DetectionParams {
    scale_factor: 1.1,
    min_neighbors: 5,
    min_size: (30, 30),
};

pub const EYE_PARAMS: DetectionParams = DetectionParams {
    scale_factor: 1.1,
    min_neighbors: 3,
    min_size: (15, 15),
};

impl DetectionParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.scale_factor.is_nan() || self.scale_factor <= 1.0 {
            return Err(format!(
                "scale factor must be greater than 1.0, got {}",
                self.scale_factor
            ));
        }
        if self.min_neighbors < 0 {
            return Err(format!(
                "minimum neighbors must be non-negative, got {}",
                self.min_neighbors
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_face_and_eye_defaults() {
        assert_eq!(FACE_PARAMS.min_neighbors, 5);
        assert_eq!(FACE_PARAMS.min_size, (30, 30));
        assert_eq!(EYE_PARAMS.min_neighbors, 3);
        assert_eq!(EYE_PARAMS.min_size, (15, 15));
        assert!(FACE_PARAMS.validate().is_ok());
        assert!(EYE_PARAMS.validate().is_ok());
    }

    #[rstest]
    #[case::unit_step(1.0, 3)]
    #[case::shrinking(0.9, 3)]
    #[case::nan(f64::NAN, 3)]
    #[case::negative_neighbors(1.1, -1)]
    fn test_validate_rejects(#[case] scale_factor: f64, #[case] min_neighbors: i32) {
        let params = DetectionParams {
            scale_factor,
            min_neighbors,
            min_size: (10, 10),
        };
        assert!(params.validate().is_err());
    }
}
