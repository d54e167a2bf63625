use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::detection::domain::detection_engine::DetectionEngine;
use crate::pipeline::frame_rate_estimator::FrameRateEstimator;
use crate::pipeline::session_logger::{PerformanceReport, SessionLogger, SessionSummary};
use crate::rendering::domain::frame_statistics::FrameStatistics;
use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::shared::camera_properties::CameraProperties;
use crate::shared::constants::{
    DEFAULT_CAMERA_INDEX, FPS_WINDOW_SIZE, KEY_POLL_MS, PERFORMANCE_REPORT_INTERVAL,
    SCREENSHOT_PATH,
};
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;
use crate::video::domain::camera::Camera;
use crate::video::domain::frame_display::FrameDisplay;
use crate::video::domain::image_writer::ImageWriter;

const QUIT_KEY: char = 'q';
const SNAPSHOT_KEY: char = 's';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    ShuttingDown,
    Terminated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaptureLoopConfig {
    pub camera_index: i32,
    pub requested: CameraProperties,
    /// Overwritten on every snapshot key press.
    pub screenshot_path: PathBuf,
    pub fps_window: usize,
    /// Processed frames between performance lines. 0 disables them.
    pub report_every: u64,
    pub key_poll_ms: i32,
}

impl Default for CaptureLoopConfig {
    fn default() -> Self {
        Self {
            camera_index: DEFAULT_CAMERA_INDEX,
            requested: CameraProperties::default(),
            screenshot_path: PathBuf::from(SCREENSHOT_PATH),
            fps_window: FPS_WINDOW_SIZE,
            report_every: PERFORMANCE_REPORT_INTERVAL,
            key_poll_ms: KEY_POLL_MS,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Live acquire, detect, render, present loop over one camera.
///
/// Classifiers arrive already loaded inside the [`DetectionEngine`]; the
/// loop opens the camera itself. Camera release and display teardown run
/// exactly once on every exit path, including a panic unwinding through
/// [`CaptureLoop::run`]. A session that was running when the panic hit
/// still reports its summary.
///
/// Fatal errors are returned, not logged at error level; the caller
/// reports them.
pub struct CaptureLoop {
    camera: Box<dyn Camera>,
    display: Box<dyn FrameDisplay>,
    engine: DetectionEngine,
    renderer: Box<dyn OverlayRenderer>,
    snapshot_writer: Box<dyn ImageWriter>,
    logger: Box<dyn SessionLogger>,
    config: CaptureLoopConfig,
    cancelled: Arc<AtomicBool>,
    state: LoopState,
    frames: u64,
    started: Option<Instant>,
    released: bool,
}

impl CaptureLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        camera: Box<dyn Camera>,
        display: Box<dyn FrameDisplay>,
        engine: DetectionEngine,
        renderer: Box<dyn OverlayRenderer>,
        snapshot_writer: Box<dyn ImageWriter>,
        logger: Box<dyn SessionLogger>,
        config: CaptureLoopConfig,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        Self {
            camera,
            display,
            engine,
            renderer,
            snapshot_writer,
            logger,
            config,
            cancelled,
            state: LoopState::Initializing,
            frames: 0,
            started: None,
            released: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs the session until quit, interruption or a fatal error.
    ///
    /// Quit and interruption return the session totals. A failure to open
    /// the camera or any non-transient error during the loop is returned
    /// after cleanup.
    pub fn run(mut self) -> Result<SessionSummary, CaptureError> {
        let negotiated = match self
            .camera
            .open(self.config.camera_index, &self.config.requested)
        {
            Ok(props) => props,
            Err(e) => {
                log::debug!("Camera initialization failed: {e}");
                self.release_resources();
                self.transition(LoopState::Terminated);
                return Err(e);
            }
        };
        self.logger.info(&format!(
            "Camera {} ready: {}x{} @ {:.0} FPS",
            self.config.camera_index, negotiated.width, negotiated.height, negotiated.fps
        ));

        let mut estimator = FrameRateEstimator::new(self.config.fps_window);
        let started = Instant::now();
        self.started = Some(started);
        self.transition(LoopState::Running);

        let outcome = loop {
            if self.cancelled.load(Ordering::SeqCst) {
                self.logger.info("Interrupted by user, exiting");
                break Ok(());
            }
            match self.step(&mut estimator, started) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    self.logger.info("Quit key pressed, exiting");
                    break Ok(());
                }
                Err(e) if e.is_transient() => {
                    self.logger
                        .warning(&format!("Failed to capture frame, retrying: {e}"));
                }
                Err(e) => {
                    log::debug!("Error during execution: {e}");
                    break Err(e);
                }
            }
        };

        let summary = self.shut_down();
        outcome.map(|()| summary)
    }

    /// Releases resources, then reports the totals of a started session.
    fn shut_down(&mut self) -> SessionSummary {
        self.transition(LoopState::ShuttingDown);
        self.release_resources();
        let summary = SessionSummary {
            frames: self.frames,
            elapsed_secs: self
                .started
                .map_or(0.0, |started| started.elapsed().as_secs_f64()),
        };
        self.logger.summary(&summary);
        self.transition(LoopState::Terminated);
        summary
    }

    /// One iteration. A transient error leaves every counter untouched.
    fn step(
        &mut self,
        estimator: &mut FrameRateEstimator,
        started: Instant,
    ) -> Result<Flow, CaptureError> {
        let mut frame = self.camera.read()?;

        let detect_start = Instant::now();
        let result = self
            .engine
            .detect(&frame)
            .map_err(|e| CaptureError::ClassifierFatal(e.to_string()))?;
        let processing_ms = detect_start.elapsed().as_secs_f64() * 1000.0;

        let stats = FrameStatistics {
            face_count: result.face_count(),
            eye_count: result.eye_count(),
            fps: estimator.update(),
            processing_ms,
        };

        self.renderer
            .draw_detections(&mut frame, &result.faces, &result.eyes)
            .map_err(|e| CaptureError::Render(e.to_string()))?;
        self.renderer
            .draw_statistics(&mut frame, &stats)
            .map_err(|e| CaptureError::Render(e.to_string()))?;

        self.display.show(&frame)?;

        match self.display.poll_key(self.config.key_poll_ms)? {
            Some(QUIT_KEY) => return Ok(Flow::Quit),
            Some(SNAPSHOT_KEY) => self.save_snapshot(&frame),
            _ => {}
        }

        self.frames += 1;
        if self.config.report_every > 0 && self.frames % self.config.report_every == 0 {
            let elapsed = started.elapsed().as_secs_f64();
            self.logger.performance(&PerformanceReport {
                frames: self.frames,
                average_fps: if elapsed > 0.0 {
                    self.frames as f64 / elapsed
                } else {
                    0.0
                },
                current_fps: stats.fps,
                processing_ms,
                faces: stats.face_count,
                eyes: stats.eye_count,
            });
        }

        Ok(Flow::Continue)
    }

    fn save_snapshot(&mut self, frame: &Frame) {
        let path = &self.config.screenshot_path;
        match self.snapshot_writer.write(path, frame) {
            Ok(()) => self
                .logger
                .info(&format!("Screenshot saved: {}", path.display())),
            Err(e) => self.logger.error(&format!(
                "Failed to save screenshot to {}: {e}",
                path.display()
            )),
        }
    }

    fn release_resources(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        log::debug!("Releasing camera and closing display");
        self.camera.release();
        self.display.close();
    }

    fn transition(&mut self, next: LoopState) {
        log::debug!("Capture loop {:?} -> {next:?}", self.state);
        self.state = next;
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        // Still running only if a panic unwound out of `run`.
        if self.state == LoopState::Running {
            self.shut_down();
        } else {
            self.release_resources();
        }
    }
}
