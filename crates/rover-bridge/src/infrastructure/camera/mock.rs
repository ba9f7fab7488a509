//! Mock frame source for unit testing.
//!
//! Lets tests hand the video path exact frame bytes (or an injected
//! failure) without touching the `image` encoder.  Clones share state, so
//! a test can keep one handle for assertions while the session owns the
//! other.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{CameraError, FrameSource};

/// A mock implementation of [`FrameSource`] driven by the test.
///
/// Queued frames are returned first, in queue order.  Once the queue is
/// empty the mock fabricates an endless sequence of distinct fallback
/// frames (`mock-frame-000001`, `mock-frame-000002`, ...) so loops that
/// run until cancelled never starve.
#[derive(Clone)]
pub struct MockCamera {
    inner: Arc<Mutex<MockCameraInner>>,
}

struct MockCameraInner {
    queued: VecDeque<Vec<u8>>,
    fail_next: bool,
    captures: u64,
}

impl MockCamera {
    /// Creates a new mock camera with an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockCameraInner {
                queued: VecDeque::new(),
                fail_next: false,
                captures: 0,
            })),
        }
    }

    /// Queues one frame to be returned ahead of the fallback sequence.
    pub fn queue_frame(&self, frame: &[u8]) {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.queued.push_back(frame.to_vec());
    }

    /// Makes the next `next_frame` call fail with a capture error.
    ///
    /// One-shot: the call after the failure succeeds again.
    pub fn fail_next_capture(&self) {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.fail_next = true;
    }

    /// Returns how many times `next_frame` has been called.
    pub fn capture_count(&self) -> u64 {
        self.inner.lock().expect("lock poisoned").captures
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for MockCamera {
    fn next_frame(&mut self) -> Result<Vec<u8>, CameraError> {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.captures += 1;

        if inner.fail_next {
            inner.fail_next = false;
            return Err(CameraError::CaptureFailed(
                "injected capture failure".to_string(),
            ));
        }

        if let Some(frame) = inner.queued.pop_front() {
            return Ok(frame);
        }
        Ok(format!("mock-frame-{:06}", inner.captures).into_bytes())
    }
}
