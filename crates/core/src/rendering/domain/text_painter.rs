use crate::shared::frame::Frame;

/// One line of overlay text anchored at its baseline origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: [u8; 3],
    pub scale: f64,
    pub thickness: i32,
}

/// Rasterizes text onto frames.
///
/// Glyph rendering is the one drawing primitive delegated to the vision
/// library; everything else in the overlay is plain pixel work.
pub trait TextPainter: Send {
    fn paint(&self, frame: &mut Frame, lines: &[TextLine])
        -> Result<(), Box<dyn std::error::Error>>;
}
