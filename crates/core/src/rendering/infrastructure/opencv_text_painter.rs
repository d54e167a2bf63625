use opencv::core::{Point, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use crate::rendering::domain::text_painter::{TextLine, TextPainter};
use crate::shared::frame::Frame;
use crate::video::infrastructure::opencv_convert::frame_to_mat;

/// Paints text with OpenCV's Hershey simplex font, anti-aliased.
pub struct OpencvTextPainter;

impl OpencvTextPainter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpencvTextPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPainter for OpencvTextPainter {
    fn paint(
        &self,
        frame: &mut Frame,
        lines: &[TextLine],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if lines.is_empty() {
            return Ok(());
        }
        // Mat mirrors the frame's RGB order, so colors go in as (r, g, b).
        let mut mat = frame_to_mat(frame)?;
        for line in lines {
            let [r, g, b] = line.color;
            imgproc::put_text(
                &mut mat,
                &line.text,
                Point::new(line.x, line.y),
                imgproc::FONT_HERSHEY_SIMPLEX,
                line.scale,
                Scalar::new(r as f64, g as f64, b as f64, 0.0),
                line.thickness,
                imgproc::LINE_AA,
                false,
            )?;
        }
        frame.data_mut().copy_from_slice(mat.data_bytes()?);
        Ok(())
    }
}
