use image::{GrayImage, RgbImage};
use ndarray::ArrayViewMut3;

use crate::shared::bounding_box::BoundingBox;

/// Channels per pixel. Frames are always packed 8-bit RGB.
pub const CHANNELS: usize = 3;

/// A single captured frame: contiguous RGB bytes in row-major order.
///
/// Camera adapters convert from the device's native layout on the way in
/// and back on the way out; everything in between sees RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// # Panics
    ///
    /// If `data` does not hold exactly `width * height * 3` bytes.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self::new(data, width, height)
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full extent of the frame as a box anchored at the origin.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ]
    }

    /// Copies the pixels into an `image` buffer for resampling and encoding.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Frame data length must match dimensions")
    }

    /// Single-channel intensity copy of the frame.
    pub fn to_luma(&self) -> GrayImage {
        image::imageops::grayscale(&self.to_rgb_image())
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics() {
        Frame::new(vec![0u8; 10], 2, 2);
    }

    #[test]
    fn test_filled_sets_every_pixel() {
        let frame = Frame::filled(3, 2, [10, 20, 30]);
        assert_eq!(frame.data().len(), 18);
        assert_eq!(frame.pixel(0, 0), [10, 20, 30]);
        assert_eq!(frame.pixel(2, 1), [10, 20, 30]);
    }

    #[test]
    fn test_bounds_covers_frame() {
        let frame = Frame::filled(64, 48, [0, 0, 0]);
        assert_eq!(frame.bounds(), BoundingBox::new(0, 0, 64, 48));
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::filled(2, 2, [0, 0, 0]);
        frame.as_ndarray_mut()[[0, 1, 2]] = 128;
        assert_eq!(frame.pixel(1, 0), [0, 0, 128]);
    }

    #[test]
    fn test_rgb_image_roundtrip_keeps_layout() {
        let frame = Frame::filled(4, 3, [1, 2, 3]);
        let back = Frame::from_rgb_image(frame.to_rgb_image());
        assert_eq!(back, frame);
    }

    #[test]
    fn test_to_luma_single_channel() {
        let frame = Frame::filled(5, 4, [255, 255, 255]);
        let gray = frame.to_luma();
        assert_eq!(gray.dimensions(), (5, 4));
        assert_eq!(gray.get_pixel(0, 0).0, [255]);
    }
}
