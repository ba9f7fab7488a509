//! Mock actuator sink for unit testing.
//!
//! Records every command and flush instead of touching a serial port, and
//! can inject a one-shot write failure.  Clones share state, so a test can
//! keep one handle for assertions while the session owns the other.

use std::io;
use std::sync::{Arc, Mutex};

use rover_core::command::ActuatorCommand;

use super::{ActuatorSink, SinkError};

/// A mock implementation of [`ActuatorSink`] that records calls.
#[derive(Clone)]
pub struct MockActuator {
    inner: Arc<Mutex<MockActuatorInner>>,
}

struct MockActuatorInner {
    commands: Vec<ActuatorCommand>,
    written: Vec<u8>,
    flushes: u64,
    fail_next_write: bool,
}

impl MockActuator {
    /// Creates a new mock actuator with nothing recorded.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockActuatorInner {
                commands: Vec::new(),
                written: Vec::new(),
                flushes: 0,
                fail_next_write: false,
            })),
        }
    }

    /// Returns every command written so far, in write order.
    pub fn commands(&self) -> Vec<ActuatorCommand> {
        self.inner.lock().expect("lock poisoned").commands.clone()
    }

    /// Returns the raw bytes written so far, terminators included.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.inner.lock().expect("lock poisoned").written.clone()
    }

    /// Returns the number of commands written so far.
    pub fn command_count(&self) -> usize {
        self.inner.lock().expect("lock poisoned").commands.len()
    }

    /// Returns how many times `flush` has been called.
    pub fn flush_count(&self) -> u64 {
        self.inner.lock().expect("lock poisoned").flushes
    }

    /// Makes the next `write_command` call fail with a sink error.
    ///
    /// One-shot: the call after the failure succeeds again.
    pub fn fail_next_write(&self) {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner.fail_next_write = true;
    }
}

impl Default for MockActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorSink for MockActuator {
    fn write_command(&mut self, command: ActuatorCommand) -> Result<(), SinkError> {
        let mut inner = self.inner.lock().expect("lock poisoned");
        if inner.fail_next_write {
            inner.fail_next_write = false;
            return Err(SinkError::WriteFailed(io::Error::other(
                "injected actuator failure",
            )));
        }
        inner.commands.push(command);
        inner.written.extend_from_slice(&command.to_bytes());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.inner.lock().expect("lock poisoned").flushes += 1;
        Ok(())
    }
}
