use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use facewatch_core::detection::domain::detection_engine::{DetectionEngine, EngineConfig};
use facewatch_core::detection::domain::detection_params::{
    DetectionParams, EYE_PARAMS, FACE_PARAMS,
};
use facewatch_core::detection::infrastructure::opencv_cascade_classifier::OpencvCascadeClassifier;
use facewatch_core::detection::infrastructure::threaded_eye_search::ThreadedEyeSearch;
use facewatch_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use facewatch_core::pipeline::capture_loop::{CaptureLoop, CaptureLoopConfig};
use facewatch_core::pipeline::session_logger::LogSessionLogger;
use facewatch_core::pipeline::verify_setup_use_case::VerifySetupUseCase;
use facewatch_core::rendering::domain::overlay_renderer::OverlayRenderer;
use facewatch_core::rendering::infrastructure::cpu_overlay_renderer::CpuOverlayRenderer;
use facewatch_core::rendering::infrastructure::opencv_text_painter::OpencvTextPainter;
use facewatch_core::shared::camera_properties::CameraProperties;
use facewatch_core::shared::cascade_resolver;
use facewatch_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, DEFAULT_CAPTURE_FPS, DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_WIDTH,
    DEFAULT_DETECTION_SCALE, EYE_CASCADE_FILE, FACE_CASCADE_FILE, FPS_WINDOW_SIZE,
    IMAGE_EXTENSIONS, KEY_POLL_MS, PERFORMANCE_REPORT_INTERVAL, SCREENSHOT_PATH, WINDOW_TITLE,
};
use facewatch_core::video::domain::frame_display::FrameDisplay;
use facewatch_core::video::infrastructure::headless_display::HeadlessDisplay;
use facewatch_core::video::infrastructure::highgui_display::HighguiDisplay;
use facewatch_core::video::infrastructure::image_file_reader::ImageFileReader;
use facewatch_core::video::infrastructure::image_file_writer::ImageFileWriter;
use facewatch_core::video::infrastructure::opencv_camera::OpencvCamera;

/// Real-time face and eye detection from a webcam.
#[derive(Parser, Debug)]
#[command(name = "facewatch")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    camera: i32,

    /// Requested capture width; the camera may negotiate another.
    #[arg(long, default_value_t = DEFAULT_CAPTURE_WIDTH)]
    width: u32,

    /// Requested capture height.
    #[arg(long, default_value_t = DEFAULT_CAPTURE_HEIGHT)]
    height: u32,

    /// Requested capture frame rate.
    #[arg(long, default_value_t = DEFAULT_CAPTURE_FPS)]
    fps: f64,

    /// Downscale factor applied before face detection (0, 1].
    #[arg(long, default_value_t = DEFAULT_DETECTION_SCALE)]
    detection_scale: f64,

    #[arg(long, default_value_t = FACE_PARAMS.scale_factor)]
    face_scale_factor: f64,

    #[arg(long, default_value_t = FACE_PARAMS.min_neighbors)]
    face_min_neighbors: i32,

    /// Smallest face window, WIDTHxHEIGHT or a single side length.
    #[arg(long, default_value = "30x30", value_parser = parse_size)]
    face_min_size: (u32, u32),

    #[arg(long, default_value_t = EYE_PARAMS.scale_factor)]
    eye_scale_factor: f64,

    #[arg(long, default_value_t = EYE_PARAMS.min_neighbors)]
    eye_min_neighbors: i32,

    /// Smallest eye window, WIDTHxHEIGHT or a single side length.
    #[arg(long, default_value = "15x15", value_parser = parse_size)]
    eye_min_size: (u32, u32),

    /// Frames averaged for the FPS estimate.
    #[arg(long, default_value_t = FPS_WINDOW_SIZE)]
    fps_window: usize,

    /// Threads used for the per-face eye search (1 = sequential).
    #[arg(long, default_value_t = 1)]
    eye_workers: usize,

    /// Directory searched first for the cascade XML files.
    #[arg(long)]
    cascade_dir: Option<PathBuf>,

    /// Where the 's' key saves the annotated frame.
    #[arg(long, default_value = SCREENSHOT_PATH)]
    screenshot: PathBuf,

    /// Frames between performance log lines (0 disables them).
    #[arg(long, default_value_t = PERFORMANCE_REPORT_INTERVAL)]
    report_every: u64,

    /// Run without a window; stop with Ctrl-C.
    #[arg(long)]
    headless: bool,

    /// Verify cascade files and camera, then exit.
    #[arg(long, conflicts_with = "image")]
    check: bool,

    /// Annotate a still image instead of the camera feed.
    #[arg(long, requires = "output")]
    image: Option<PathBuf>,

    /// Output file for --image.
    #[arg(long, requires = "image")]
    output: Option<PathBuf>,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            detection_scale: self.detection_scale,
            face_params: DetectionParams {
                scale_factor: self.face_scale_factor,
                min_neighbors: self.face_min_neighbors,
                min_size: self.face_min_size,
            },
            eye_params: DetectionParams {
                scale_factor: self.eye_scale_factor,
                min_neighbors: self.eye_min_neighbors,
                min_size: self.eye_min_size,
            },
        }
    }

    fn requested_properties(&self) -> CameraProperties {
        CameraProperties {
            width: self.width,
            height: self.height,
            fps: self.fps,
        }
    }

    fn loop_config(&self) -> CaptureLoopConfig {
        CaptureLoopConfig {
            camera_index: self.camera,
            requested: self.requested_properties(),
            screenshot_path: self.screenshot.clone(),
            fps_window: self.fps_window,
            report_every: self.report_every,
            key_poll_ms: KEY_POLL_MS,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(cli)?;
    let dirs = cascade_resolver::search_dirs(cli.cascade_dir.as_deref());

    if cli.check {
        return run_check(cli, dirs);
    }

    print_banner();
    log::info!("[1/3] Loading detection models...");
    let engine = build_engine(cli, &dirs)?;

    if let (Some(input), Some(output)) = (&cli.image, &cli.output) {
        return run_image(input, output, engine);
    }

    run_live(cli, engine)
}

fn run_live(cli: &Cli, engine: DetectionEngine) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("[2/3] Initializing camera {}...", cli.camera);
    let display: Box<dyn FrameDisplay> = if cli.headless {
        Box::new(HeadlessDisplay::new())
    } else {
        Box::new(HighguiDisplay::new(WINDOW_TITLE)?)
    };

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    let capture = CaptureLoop::new(
        Box::new(OpencvCamera::new()),
        display,
        engine,
        renderer(),
        Box::new(ImageFileWriter::new()),
        Box::new(LogSessionLogger::new()),
        cli.loop_config(),
        cancelled,
    );

    log::info!("[3/3] Starting detection");
    if cli.headless {
        log::info!("Running headless, press Ctrl-C to stop");
    } else {
        log::info!("Controls: 'q' quit, 's' save screenshot");
    }

    capture.run()?;
    log::info!("Application closed successfully");
    Ok(())
}

fn run_image(
    input: &Path,
    output: &Path,
    engine: DetectionEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let use_case = AnnotateImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        engine,
        renderer(),
    );
    let result = use_case.execute(input, output)?;
    log::info!(
        "{} faces, {} eyes; output written to {}",
        result.face_count(),
        result.eye_count(),
        output.display()
    );
    Ok(())
}

fn run_check(cli: &Cli, dirs: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = VerifySetupUseCase::new(Box::new(OpencvCamera::new()), dirs);
    let report = use_case.execute(cli.camera, &cli.requested_properties());

    for (label, cascade) in [
        ("Face cascade", &report.face_cascade),
        ("Eye cascade", &report.eye_cascade),
    ] {
        match cascade {
            Ok(path) => log::info!("{label}: {}", path.display()),
            Err(e) => log::error!("{label}: {e}"),
        }
    }
    match &report.camera {
        Ok(props) => log::info!(
            "Camera {}: {}x{} @ {:.0} FPS",
            cli.camera,
            props.width,
            props.height,
            props.fps
        ),
        Err(e) => log::warn!("{e} (it may be in use by another application)"),
    }

    if report.is_ready() {
        log::info!("Setup looks good");
        Ok(())
    } else {
        Err("setup incomplete: cascade files missing".into())
    }
}

fn build_engine(
    cli: &Cli,
    dirs: &[PathBuf],
) -> Result<DetectionEngine, Box<dyn std::error::Error>> {
    let face = load_classifier(FACE_CASCADE_FILE, dirs, 1)?;
    // One eye cascade per worker so per-face searches do not queue on a
    // single handle.
    let eye = load_classifier(EYE_CASCADE_FILE, dirs, cli.eye_workers)?;
    let eye_handles = eye.copies();
    let engine = DetectionEngine::new(Box::new(face), Box::new(eye), cli.engine_config())?;

    if cli.eye_workers > 1 {
        log::info!("Eye search on {} workers ({eye_handles} cascade handles)", cli.eye_workers);
        Ok(engine.with_eye_search(Box::new(ThreadedEyeSearch::new(cli.eye_workers)?)))
    } else {
        Ok(engine)
    }
}

fn load_classifier(
    name: &str,
    dirs: &[PathBuf],
    copies: usize,
) -> Result<OpencvCascadeClassifier, Box<dyn std::error::Error>> {
    let path = cascade_resolver::resolve(name, dirs)?;
    let classifier = OpencvCascadeClassifier::load_copies(&path, copies)?;
    log::info!("Loaded {}", path.display());
    Ok(classifier)
}

fn renderer() -> Box<dyn OverlayRenderer> {
    Box::new(CpuOverlayRenderer::new(Box::new(OpencvTextPainter::new())))
}

fn print_banner() {
    log::info!("{}", "=".repeat(60));
    log::info!("Real-Time Face & Eye Detection System");
    log::info!("{}", "=".repeat(60));
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(cli.detection_scale > 0.0 && cli.detection_scale <= 1.0) {
        return Err(format!(
            "Detection scale must be in (0, 1], got {}",
            cli.detection_scale
        )
        .into());
    }
    if cli.width == 0 || cli.height == 0 {
        return Err(format!(
            "Capture size must be non-zero, got {}x{}",
            cli.width, cli.height
        )
        .into());
    }
    if cli.fps.is_nan() || cli.fps <= 0.0 {
        return Err(format!("Frame rate must be positive, got {}", cli.fps).into());
    }
    if cli.fps_window == 0 {
        return Err("FPS window must be at least 1".into());
    }
    if cli.eye_workers == 0 {
        return Err("Eye workers must be at least 1".into());
    }
    let config = cli.engine_config();
    config
        .face_params
        .validate()
        .map_err(|e| format!("Invalid face parameters: {e}"))?;
    config
        .eye_params
        .validate()
        .map_err(|e| format!("Invalid eye parameters: {e}"))?;
    if let Some(input) = &cli.image {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !is_image(input) {
            return Err(format!("Unsupported image type: {}", input.display()).into());
        }
    }
    if let Some(output) = &cli.output {
        if !is_image(output) {
            return Err(format!("Unsupported output type: {}", output.display()).into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parses `WIDTHxHEIGHT`, or a single number for a square window.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid size '{s}': {e}"))
    };
    match s.split_once(['x', 'X']) {
        Some((w, h)) => Ok((parse(w)?, parse(h)?)),
        None => {
            let side = parse(s)?;
            Ok((side, side))
        }
    }
}
