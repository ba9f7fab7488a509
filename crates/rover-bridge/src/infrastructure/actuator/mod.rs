//! Actuator sink adapters.
//!
//! The control path ends at a byte-oriented device: the microcontroller
//! driving the rover's motors and pan servos, attached over a serial
//! link.  [`ActuatorSink`] is the seam: one write per translated command,
//! then a flush so the command leaves the host immediately rather than
//! sitting in a buffer while the rover keeps moving on a stale command.
//!
//! Implementations: [`SerialActuator`] for the real device and
//! [`MockActuator`] for tests.

use std::path::PathBuf;

use thiserror::Error;

use rover_core::command::ActuatorCommand;

pub mod mock;
pub mod serial;

pub use mock::MockActuator;
pub use serial::SerialActuator;

/// Error type for actuator sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The serial device could not be opened.
    #[error("failed to open actuator device {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: serialport::Error,
    },

    /// A write to the device failed or completed short.
    #[error("actuator write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// Flushing buffered bytes to the device failed.
    #[error("actuator flush failed: {0}")]
    FlushFailed(#[source] std::io::Error),
}

/// A blocking sink for translated actuator commands.
///
/// Writes are small (five bytes) and bounded, so implementations are
/// called inline from the control task rather than through a blocking
/// executor.
pub trait ActuatorSink: Send {
    /// Writes one command, terminator included, as a single unit.
    fn write_command(&mut self, command: ActuatorCommand) -> Result<(), SinkError>;

    /// Blocks until previously written commands have reached the device.
    fn flush(&mut self) -> Result<(), SinkError>;
}
