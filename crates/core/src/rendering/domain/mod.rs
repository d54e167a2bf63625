pub mod frame_statistics;
pub mod overlay_renderer;
pub mod text_painter;
