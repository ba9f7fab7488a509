//! Camera frame-source adapters.
//!
//! The video path needs exactly one capability from a camera: "block until
//! the next encoded frame is ready and hand it over".  [`FrameSource`]
//! captures that.  Real capture hardware (V4L2, CSI ribbon cameras) plugs
//! in behind this trait; in this tree the implementations are
//! [`SyntheticCamera`], a test-pattern generator used for bench runs and
//! demos without hardware, and [`MockCamera`] for tests.

use thiserror::Error;

pub mod mock;
pub mod synthetic;

pub use mock::MockCamera;
pub use synthetic::SyntheticCamera;

/// Error type for frame capture and encoding.
#[derive(Debug, Error)]
pub enum CameraError {
    /// The capture device failed to produce an image.
    #[error("frame capture failed: {0}")]
    CaptureFailed(String),

    /// The captured image could not be encoded.
    #[error("frame encoding failed: {0}")]
    EncodeFailed(#[from] image::ImageError),
}

/// A blocking source of encoded camera frames.
///
/// One call, one frame, already encoded for the wire.  Calls block until
/// the frame is ready, so the video task must run them on a
/// blocking-capable thread rather than directly on the async runtime.
pub trait FrameSource: Send {
    /// Captures and encodes the next frame.
    fn next_frame(&mut self) -> Result<Vec<u8>, CameraError>;
}
