//! Synthetic test-pattern camera.
//!
//! Produces JPEG frames without any capture hardware: a fixed gradient
//! backdrop with a bright bar that advances one step per frame, so
//! consecutive frames are visibly (and byte-wise) different.  Used by the
//! bridge when developing off the rover, and by integration tests that
//! need real encoded frames of a configured size.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbImage};

use super::{CameraError, FrameSource};

/// Width of the moving bar in pixels.
const BAR_WIDTH: u32 = 16;

/// A [`FrameSource`] that fabricates frames instead of capturing them.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    jpeg_quality: u8,
    frame_index: u64,
}

impl SyntheticCamera {
    /// Creates a camera producing `width` x `height` JPEG frames at the
    /// given quality (1-100).
    pub fn new(width: u32, height: u32, jpeg_quality: u8) -> Self {
        Self {
            width,
            height,
            jpeg_quality,
            frame_index: 0,
        }
    }

    /// Renders the test pattern for the current frame index.
    fn render(&self) -> RgbImage {
        let bar_x = ((self.frame_index * 4) % u64::from(self.width.max(1))) as u32;

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let in_bar = x >= bar_x && x < bar_x.saturating_add(BAR_WIDTH);
            if in_bar {
                Rgb([255, 255, 255])
            } else {
                // Horizontal red gradient over a vertical green gradient
                // gives every pixel position a distinct colour.
                let r = (x * 255 / self.width.max(1)) as u8;
                let g = (y * 255 / self.height.max(1)) as u8;
                Rgb([r, g, 64])
            }
        })
    }
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Result<Vec<u8>, CameraError> {
        let img = self.render();
        self.frame_index = self.frame_index.wrapping_add(1);

        let mut buf = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buf, self.jpeg_quality);
        img.write_with_encoder(encoder)?;
        Ok(buf.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_camera_produces_jpeg_frames() {
        // Arrange
        let mut cam = SyntheticCamera::new(64, 48, 70);

        // Act
        let frame = cam.next_frame().expect("capture must succeed");

        // Assert: JPEG SOI marker at the start, EOI marker at the end.
        assert!(frame.len() > 4, "frame must not be empty");
        assert_eq!(&frame[0..2], &[0xFF, 0xD8], "missing JPEG SOI marker");
        assert_eq!(
            &frame[frame.len() - 2..],
            &[0xFF, 0xD9],
            "missing JPEG EOI marker"
        );
    }

    #[test]
    fn test_synthetic_camera_frames_have_configured_dimensions() {
        let mut cam = SyntheticCamera::new(64, 48, 70);
        let frame = cam.next_frame().expect("capture must succeed");

        let decoded = image::load_from_memory(&frame).expect("frame must decode as an image");
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn test_synthetic_camera_consecutive_frames_differ() {
        // The moving bar guarantees consecutive frames encode differently,
        // which keeps downstream "did a new frame arrive" checks honest.
        let mut cam = SyntheticCamera::new(64, 48, 70);
        let first = cam.next_frame().expect("capture must succeed");
        let second = cam.next_frame().expect("capture must succeed");
        assert_ne!(first, second);
    }
}
