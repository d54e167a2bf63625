use crate::rendering::domain::frame_statistics::FrameStatistics;
use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::rendering::domain::text_painter::{TextLine, TextPainter};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

use super::primitives;

pub const FACE_COLOR: [u8; 3] = [0, 255, 0];
pub const EYE_COLOR: [u8; 3] = [0, 0, 255];
pub const TEXT_COLOR: [u8; 3] = [255, 255, 255];
pub const PANEL_COLOR: [u8; 3] = [0, 0, 0];

pub const OUTLINE_THICKNESS: i32 = 2;

/// Statistics panel spanning (10,10)-(300,150), both corners included.
pub const PANEL: BoundingBox = BoundingBox::new(10, 10, 291, 141);
pub const PANEL_OPACITY: f64 = 0.7;

const TEXT_X: i32 = 20;
const TEXT_FIRST_BASELINE: i32 = 30;
const TEXT_LINE_HEIGHT: i32 = 25;
const TEXT_SCALE: f64 = 0.6;
const TEXT_THICKNESS: i32 = 2;

/// Overlay renderer doing box and panel work directly on the pixel buffer,
/// handing only glyphs to a [`TextPainter`].
pub struct CpuOverlayRenderer {
    painter: Box<dyn TextPainter>,
}

impl CpuOverlayRenderer {
    pub fn new(painter: Box<dyn TextPainter>) -> Self {
        Self { painter }
    }

    fn text_lines(stats: &FrameStatistics) -> Vec<TextLine> {
        stats
            .panel_lines()
            .into_iter()
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .map(|(i, text)| TextLine {
                text,
                x: TEXT_X,
                y: TEXT_FIRST_BASELINE + i as i32 * TEXT_LINE_HEIGHT,
                color: TEXT_COLOR,
                scale: TEXT_SCALE,
                thickness: TEXT_THICKNESS,
            })
            .collect()
    }
}

impl OverlayRenderer for CpuOverlayRenderer {
    fn draw_detections(
        &self,
        frame: &mut Frame,
        faces: &[BoundingBox],
        eyes: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for face in faces {
            primitives::draw_rect_outline(frame, face, FACE_COLOR, OUTLINE_THICKNESS);
        }
        for eye in eyes {
            primitives::draw_rect_outline(frame, eye, EYE_COLOR, OUTLINE_THICKNESS);
        }
        Ok(())
    }

    fn draw_statistics(
        &self,
        frame: &mut Frame,
        stats: &FrameStatistics,
    ) -> Result<(), Box<dyn std::error::Error>> {
        primitives::blend_rect(frame, &PANEL, PANEL_COLOR, PANEL_OPACITY);
        self.painter.paint(frame, &Self::text_lines(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Painted = Arc<Mutex<Vec<TextLine>>>;

    struct RecordingPainter {
        painted: Painted,
    }

    impl TextPainter for RecordingPainter {
        fn paint(
            &self,
            _frame: &mut Frame,
            lines: &[TextLine],
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.painted.lock().unwrap().extend_from_slice(lines);
            Ok(())
        }
    }

    fn renderer() -> (CpuOverlayRenderer, Painted) {
        let painted = Painted::default();
        let renderer = CpuOverlayRenderer::new(Box::new(RecordingPainter {
            painted: painted.clone(),
        }));
        (renderer, painted)
    }

    const BG: [u8; 3] = [120, 130, 140];

    fn outside(b: &BoundingBox, x: u32, y: u32) -> bool {
        let (x, y) = (x as i32, y as i32);
        x < b.x || y < b.y || x >= b.right() || y >= b.bottom()
    }

    #[test]
    fn test_faces_and_eyes_use_distinct_colors() {
        let (renderer, _) = renderer();
        let mut frame = Frame::filled(200, 200, BG);
        let face = BoundingBox::new(20, 20, 100, 100);
        let eye = BoundingBox::new(40, 40, 20, 20);

        renderer.draw_detections(&mut frame, &[face], &[eye]).unwrap();

        assert_eq!(frame.pixel(20, 20), FACE_COLOR);
        assert_eq!(frame.pixel(120, 120), FACE_COLOR);
        assert_eq!(frame.pixel(40, 40), EYE_COLOR);
        assert_eq!(frame.pixel(60, 60), EYE_COLOR);
        assert_eq!(frame.pixel(50, 50), BG);
        assert_eq!(frame.pixel(80, 80), BG);
    }

    #[test]
    fn test_no_detections_leaves_frame_untouched() {
        let (renderer, _) = renderer();
        let mut frame = Frame::filled(64, 64, BG);
        let before = frame.clone();
        renderer.draw_detections(&mut frame, &[], &[]).unwrap();
        assert_eq!(frame, before);
    }

    #[test]
    fn test_statistics_only_touch_panel() {
        let (renderer, _) = renderer();
        let mut frame = Frame::filled(320, 240, BG);
        let before = frame.clone();

        renderer
            .draw_statistics(&mut frame, &FrameStatistics::default())
            .unwrap();

        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if outside(&PANEL, x, y) {
                    assert_eq!(frame.pixel(x, y), before.pixel(x, y), "({x}, {y})");
                } else {
                    assert_eq!(frame.pixel(x, y), [36, 39, 42], "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_panel_includes_far_corner_row_and_column() {
        let (renderer, _) = renderer();
        let mut frame = Frame::filled(640, 480, [100, 100, 100]);

        renderer
            .draw_statistics(&mut frame, &FrameStatistics::default())
            .unwrap();

        assert_eq!(frame.pixel(10, 10), [30, 30, 30]);
        assert_eq!(frame.pixel(299, 149), [30, 30, 30]);
        assert_eq!(frame.pixel(300, 150), [30, 30, 30]);
        assert_eq!(frame.pixel(300, 20), [30, 30, 30]);
        assert_eq!(frame.pixel(20, 150), [30, 30, 30]);
        assert_eq!(frame.pixel(301, 150), [100, 100, 100]);
        assert_eq!(frame.pixel(300, 151), [100, 100, 100]);
        assert_eq!(frame.pixel(9, 9), [100, 100, 100]);
    }

    #[test]
    fn test_statistics_text_layout() {
        let (renderer, painted) = renderer();
        let mut frame = Frame::filled(320, 240, BG);
        let stats = FrameStatistics {
            face_count: 1,
            eye_count: 2,
            fps: 29.97,
            processing_ms: 8.04,
        };

        renderer.draw_statistics(&mut frame, &stats).unwrap();

        let lines = painted.lock().unwrap();
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Faces: 1",
                "Eyes: 2",
                "FPS: 30.0",
                "Processing: 8.0ms",
                "Press 'q' to quit",
                "Press 's' for screenshot",
            ]
        );
        let baselines: Vec<i32> = lines.iter().map(|l| l.y).collect();
        assert_eq!(baselines, vec![30, 55, 80, 105, 155, 180]);
        assert!(lines.iter().all(|l| l.x == 20 && l.color == TEXT_COLOR));
    }

    #[test]
    fn test_statistics_show_capped_face_count() {
        let (renderer, painted) = renderer();
        let mut frame = Frame::filled(320, 240, BG);
        let stats = FrameStatistics {
            face_count: 7,
            ..Default::default()
        };

        renderer.draw_statistics(&mut frame, &stats).unwrap();

        assert_eq!(painted.lock().unwrap()[0].text, "Faces: 5");
    }

    #[test]
    fn test_panel_on_tiny_frame_is_clipped() {
        let (renderer, _) = renderer();
        let mut frame = Frame::filled(16, 16, BG);
        renderer
            .draw_statistics(&mut frame, &FrameStatistics::default())
            .unwrap();
        assert_eq!(frame.pixel(0, 0), BG);
        assert_eq!(frame.pixel(9, 15), BG);
        assert_ne!(frame.pixel(15, 15), BG);
    }
}
