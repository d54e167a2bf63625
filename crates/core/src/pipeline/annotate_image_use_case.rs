use std::path::Path;
use std::time::Instant;

use crate::detection::domain::detection_engine::DetectionEngine;
use crate::detection::domain::detection_result::DetectionResult;
use crate::rendering::domain::frame_statistics::FrameStatistics;
use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::video::domain::image_reader::ImageReader;
use crate::video::domain::image_writer::ImageWriter;

/// Single-image pipeline: read → detect → draw → write.
///
/// The statistics panel carries the measured detection time and an FPS
/// of zero, since there is no frame stream to average over.
pub struct AnnotateImageUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    engine: DetectionEngine,
    renderer: Box<dyn OverlayRenderer>,
}

impl AnnotateImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        engine: DetectionEngine,
        renderer: Box<dyn OverlayRenderer>,
    ) -> Self {
        Self {
            reader,
            writer,
            engine,
            renderer,
        }
    }

    pub fn execute(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<DetectionResult, Box<dyn std::error::Error>> {
        let mut frame = self.reader.read(input_path)?;

        let start = Instant::now();
        let result = self.engine.detect(&frame)?;
        let stats = FrameStatistics {
            face_count: result.face_count(),
            eye_count: result.eye_count(),
            fps: 0.0,
            processing_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        self.renderer
            .draw_detections(&mut frame, &result.faces, &result.eyes)?;
        self.renderer.draw_statistics(&mut frame, &stats)?;
        self.writer.write(output_path, &frame)?;

        Ok(result)
    }
}
