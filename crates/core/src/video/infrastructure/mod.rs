pub mod headless_display;
#[cfg(feature = "opencv")]
pub mod highgui_display;
pub mod image_file_reader;
pub mod image_file_writer;
#[cfg(feature = "opencv")]
pub mod opencv_camera;
#[cfg(feature = "opencv")]
pub mod opencv_convert;
