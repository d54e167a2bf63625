pub mod annotate_image_use_case;
pub mod capture_loop;
pub mod frame_rate_estimator;
pub mod session_logger;
pub mod verify_setup_use_case;
