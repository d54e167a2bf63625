use crate::shared::constants::MAX_DISPLAYED_FACES;

/// Per-frame numbers shown in the statistics panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStatistics {
    /// Faces actually detected; the panel caps what it shows.
    pub face_count: usize,
    pub eye_count: usize,
    pub fps: f64,
    pub processing_ms: f64,
}

impl FrameStatistics {
    pub fn displayed_face_count(&self) -> usize {
        self.face_count.min(MAX_DISPLAYED_FACES)
    }

    /// Panel text, top to bottom. Empty strings are spacer lines.
    pub fn panel_lines(&self) -> Vec<String> {
        vec![
            format!("Faces: {}", self.displayed_face_count()),
            format!("Eyes: {}", self.eye_count),
            format!("FPS: {:.1}", self.fps),
            format!("Processing: {:.1}ms", self.processing_ms),
            String::new(),
            "Press 'q' to quit".to_string(),
            "Press 's' for screenshot".to_string(),
        ]
    }
}
