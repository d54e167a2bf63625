/// One periodic performance line emitted by the capture loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    pub frames: u64,
    /// Frames processed divided by wall time since the loop started.
    pub average_fps: f64,
    /// Rolling-window estimate at the time of the report.
    pub current_fps: f64,
    pub processing_ms: f64,
    pub faces: usize,
    pub eyes: usize,
}

impl PerformanceReport {
    pub fn line(&self) -> String {
        format!(
            "Performance: {:.1} avg FPS | {:.1} current FPS | {:.1}ms/frame | {} faces, {} eyes",
            self.average_fps, self.current_fps, self.processing_ms, self.faces, self.eyes
        )
    }
}

/// Totals for one capture session, reported after cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSummary {
    pub frames: u64,
    pub elapsed_secs: f64,
}

impl SessionSummary {
    pub fn average_fps(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.frames as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Total frames processed: {}", self.frames),
            format!("Total time: {:.1} seconds", self.elapsed_secs),
            format!("Average FPS: {:.1}", self.average_fps()),
        ]
    }
}

/// Observer for capture-session diagnostics.
///
/// Keeps the capture loop free of any particular output mechanism; the CLI
/// routes everything through the `log` crate while tests record events.
pub trait SessionLogger: Send {
    fn info(&mut self, message: &str);

    /// A recoverable problem, e.g. a frame the camera failed to deliver.
    fn warning(&mut self, message: &str);

    fn error(&mut self, message: &str);

    fn performance(&mut self, report: &PerformanceReport);

    fn summary(&mut self, summary: &SessionSummary);
}

/// Forwards events to the `log` facade.
///
/// The session summary is only written when at least one frame was
/// processed.
#[derive(Default)]
pub struct LogSessionLogger;

impl LogSessionLogger {
    pub fn new() -> Self {
        Self
    }
}

impl SessionLogger for LogSessionLogger {
    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warning(&mut self, message: &str) {
        log::warn!("{message}");
    }

    fn error(&mut self, message: &str) {
        log::error!("{message}");
    }

    fn performance(&mut self, report: &PerformanceReport) {
        log::info!("{}", report.line());
    }

    fn summary(&mut self, summary: &SessionSummary) {
        if summary.frames == 0 {
            return;
        }
        log::info!("Session statistics:");
        for line in summary.lines() {
            log::info!("  {line}");
        }
    }
}
