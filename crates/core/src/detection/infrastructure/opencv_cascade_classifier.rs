use std::path::{Path, PathBuf};

use image::GrayImage;
use opencv::core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1};
use opencv::objdetect::{CascadeClassifier, CASCADE_SCALE_IMAGE};
use opencv::prelude::*;
use thiserror::Error;

use crate::detection::domain::classifier::{Classifier, ClassifierError};
use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::infrastructure::handle_pool::HandlePool;
use crate::shared::bounding_box::BoundingBox;

#[derive(Error, Debug)]
pub enum CascadeLoadError {
    #[error("cascade path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("failed to load cascade from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
    #[error("cascade at {0} loaded empty (not a cascade definition?)")]
    Empty(PathBuf),
}

/// Haar/LBP cascade backed by OpenCV's `CascadeClassifier`.
///
/// OpenCV mutates internal scratch buffers during detection, so each loaded
/// copy of the cascade serves one call at a time. Loading several copies
/// lets that many threads detect concurrently.
pub struct OpencvCascadeClassifier {
    handles: HandlePool<CascadeClassifier>,
}

impl OpencvCascadeClassifier {
    /// Loads `copies` independent handles of the same cascade (at least one).
    pub fn load_copies(path: &Path, copies: usize) -> Result<Self, CascadeLoadError> {
        let handles = (0..copies.max(1))
            .map(|_| load_one(path))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Loaded {} cascade handle(s) from {}", handles.len(), path.display());
        let handles =
            HandlePool::new(handles).map_err(|_| CascadeLoadError::Empty(path.to_path_buf()))?;
        Ok(Self { handles })
    }

    /// Number of loaded handles, i.e. how many detections can run at once.
    pub fn copies(&self) -> usize {
        self.handles.size()
    }
}

fn load_one(path: &Path) -> Result<CascadeClassifier, CascadeLoadError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| CascadeLoadError::InvalidPath(path.to_path_buf()))?;
    let cascade = CascadeClassifier::new(path_str).map_err(|e| CascadeLoadError::Load {
        path: path.to_path_buf(),
        source: e,
    })?;
    let empty = cascade.empty().map_err(|e| CascadeLoadError::Load {
        path: path.to_path_buf(),
        source: e,
    })?;
    if empty {
        return Err(CascadeLoadError::Empty(path.to_path_buf()));
    }
    Ok(cascade)
}

impl Classifier for OpencvCascadeClassifier {
    fn detect(
        &self,
        image: &GrayImage,
        params: &DetectionParams,
    ) -> Result<Vec<BoundingBox>, ClassifierError> {
        let mat = gray_to_mat(image)?;
        let mut rects = Vector::<Rect>::new();
        let (min_w, min_h) = params.min_size;

        self.handles.with(|cascade| {
            cascade.detect_multi_scale(
                &mat,
                &mut rects,
                params.scale_factor,
                params.min_neighbors,
                CASCADE_SCALE_IMAGE,
                Size::new(min_w as i32, min_h as i32),
                Size::default(),
            )
        })??;

        Ok(rects
            .iter()
            .map(|r| BoundingBox::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

fn gray_to_mat(image: &GrayImage) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        image.height() as i32,
        image.width() as i32,
        CV_8UC1,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(image.as_raw());
    Ok(mat)
}
