pub mod handle_pool;
#[cfg(feature = "opencv")]
pub mod opencv_cascade_classifier;
pub mod threaded_eye_search;
