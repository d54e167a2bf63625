pub mod cpu_overlay_renderer;
#[cfg(feature = "opencv")]
pub mod opencv_text_painter;
mod primitives;
