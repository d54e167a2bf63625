use crate::rendering::domain::frame_statistics::FrameStatistics;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Draws detection outlines and the statistics panel onto a frame in place.
pub trait OverlayRenderer: Send {
    fn draw_detections(
        &self,
        frame: &mut Frame,
        faces: &[BoundingBox],
        eyes: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn draw_statistics(
        &self,
        frame: &mut Frame,
        stats: &FrameStatistics,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
