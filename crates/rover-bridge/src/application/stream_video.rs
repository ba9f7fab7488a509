//! StreamVideoUseCase: pushes camera frames to the operator for the life
//! of a session.
//!
//! Loop: capture one encoded frame, write its 4-byte length prefix, write
//! the payload, repeat.  Frames go out in strict capture order; nothing
//! is dropped, retried, or rate-limited.  If the operator stops reading,
//! the socket write blocks and capture stalls with it; that backpressure
//! is the only flow control.
//!
//! Frame capture is blocking (camera pipelines wait on the sensor), so
//! each capture runs on a blocking-capable thread while the task itself
//! stays responsive to cancellation.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::task::spawn_blocking;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use rover_core::protocol::codec::{encode_frame_header, ProtocolError};

use crate::infrastructure::camera::{CameraError, FrameSource};

/// Error type for the video path.  Every variant is fatal for the unit.
#[derive(Debug, Error)]
pub enum VideoError {
    /// Frame capture or encoding failed.
    #[error("frame capture failed: {0}")]
    Capture(#[from] CameraError),

    /// The frame cannot be represented on the wire.
    #[error("frame framing failed: {0}")]
    Framing(#[from] ProtocolError),

    /// A write to the operator channel failed or completed short.
    #[error("failed to send {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Use case driving the outbound video direction of one session.
pub struct StreamVideoUseCase<W> {
    writer: W,
    cancel: CancellationToken,
}

impl<W> StreamVideoUseCase<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Creates the use case over the session's write half.
    pub fn new(writer: W, cancel: CancellationToken) -> Self {
        Self { writer, cancel }
    }

    /// Runs the send loop until cancelled or a fatal error occurs.
    ///
    /// Returns the number of frames sent when the session is cancelled;
    /// any capture, framing, or transport failure ends the loop with an
    /// error instead.
    pub async fn run(mut self, source: Box<dyn FrameSource>) -> Result<u64, VideoError> {
        let mut source = source;
        let mut frames_sent: u64 = 0;

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            // The source moves onto the blocking thread and back out with
            // the captured frame.
            let capture = spawn_blocking(move || {
                let frame = source.next_frame();
                (source, frame)
            });

            let (returned, captured) = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                joined = capture => joined.map_err(|e| {
                    VideoError::Capture(CameraError::CaptureFailed(format!(
                        "capture task failed: {e}"
                    )))
                })?,
            };
            source = returned;
            let frame = captured?;

            let header = encode_frame_header(frame.len())?;
            self.writer
                .write_all(&header)
                .await
                .map_err(|source| VideoError::Transport {
                    operation: "frame header",
                    source,
                })?;
            self.writer
                .write_all(&frame)
                .await
                .map_err(|source| VideoError::Transport {
                    operation: "frame payload",
                    source,
                })?;

            frames_sent += 1;
            debug!(frame = frames_sent, bytes = frame.len(), "frame sent");
        }

        Ok(frames_sent)
    }
}
