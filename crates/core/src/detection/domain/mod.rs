pub mod classifier;
pub mod detection_engine;
pub mod detection_params;
pub mod detection_result;
pub mod eye_search;
