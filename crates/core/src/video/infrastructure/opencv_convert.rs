use opencv::core::{AlgorithmHint, Mat, Scalar, CV_8UC3};
use opencv::imgproc;
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copies an RGB frame into a new 3-channel `Mat` with the same byte order.
pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}

/// Converts an RGB frame to the BGR layout OpenCV's display and codecs use.
pub fn frame_to_bgr_mat(frame: &Frame) -> opencv::Result<Mat> {
    let rgb = frame_to_mat(frame)?;
    let mut bgr = Mat::default();
    imgproc::cvt_color(
        &rgb,
        &mut bgr,
        imgproc::COLOR_RGB2BGR,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;
    Ok(bgr)
}

/// Converts a captured BGR `Mat` into an RGB frame.
pub fn bgr_mat_to_frame(bgr: &Mat) -> opencv::Result<Frame> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(
        bgr,
        &mut rgb,
        imgproc::COLOR_BGR2RGB,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;
    let rgb = if rgb.is_continuous() {
        rgb
    } else {
        rgb.try_clone()?
    };
    Ok(Frame::new(
        rgb.data_bytes()?.to_vec(),
        rgb.cols() as u32,
        rgb.rows() as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgr_roundtrip_restores_rgb() {
        let frame = Frame::filled(6, 4, [10, 20, 30]);
        let bgr = frame_to_bgr_mat(&frame).unwrap();
        let px = *bgr.at_2d::<opencv::core::Vec3b>(0, 0).unwrap();
        assert_eq!(px.0, [30, 20, 10]);

        let back = bgr_mat_to_frame(&bgr).unwrap();
        assert_eq!(back, frame);
    }
}
