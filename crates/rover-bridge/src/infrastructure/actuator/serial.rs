//! Serial actuator sink.
//!
//! Opens the microcontroller's USB-serial port (`/dev/ttyACM0` on the
//! rover) at 8N1 with flow control off, the firmware's fixed line
//! settings.  Each command is written with its terminator and flushed
//! immediately; the firmware parses commands on `'\n'`.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::info;

use rover_core::command::ActuatorCommand;

use super::{ActuatorSink, SinkError};

/// Write timeout for the serial port.  Commands are five bytes; if the
/// device cannot take them within this window the link is wedged and the
/// control path should fail rather than stall the session.
const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

/// An [`ActuatorSink`] backed by a serial port.
pub struct SerialActuator {
    port: Box<dyn SerialPort>,
}

impl SerialActuator {
    /// Opens the serial device at the given baud rate.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::OpenFailed`] if the device cannot be opened
    /// (missing, busy, or permission denied).
    pub fn open(path: &Path, baud_rate: u32) -> Result<Self, SinkError> {
        let port = serialport::new(path.to_string_lossy(), baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| SinkError::OpenFailed {
                path: path.to_path_buf(),
                source,
            })?;

        info!(device = %path.display(), baud_rate, "actuator serial port opened");
        Ok(SerialActuator { port })
    }
}

impl ActuatorSink for SerialActuator {
    fn write_command(&mut self, command: ActuatorCommand) -> Result<(), SinkError> {
        self.port
            .write_all(&command.to_bytes())
            .map_err(SinkError::WriteFailed)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.port.flush().map_err(SinkError::FlushFailed)
    }
}
