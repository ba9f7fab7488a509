//! RelayControlUseCase: reads operator control records and drives the
//! actuator.
//!
//! Loop: read one four-field record (four big-endian i32 reads, in
//! order), translate it, write the 5-byte command to the sink, flush,
//! repeat.  Records are atomic: translation never sees a partially read
//! record, and cancellation mid-record abandons the bytes read so far
//! instead of forwarding them.
//!
//! A short or failed read is fatal and names the field it happened on;
//! a sink failure is fatal for the whole control path.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use rover_core::command::translate;
use rover_core::protocol::messages::ControlRecord;

use crate::infrastructure::actuator::{ActuatorSink, SinkError};

/// Error type for the control path.  Every variant is fatal for the unit.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Reading a record field from the operator channel failed or came
    /// up short.
    #[error("failed to read {field}: {source}")]
    Transport {
        field: &'static str,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the translated command failed.
    #[error("actuator sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Use case driving the inbound control direction of one session.
pub struct RelayControlUseCase<R> {
    reader: R,
    cancel: CancellationToken,
}

impl<R> RelayControlUseCase<R>
where
    R: AsyncRead + Unpin + Send,
{
    /// Creates the use case over the session's read half.
    pub fn new(reader: R, cancel: CancellationToken) -> Self {
        Self { reader, cancel }
    }

    /// Runs the relay loop until cancelled or a fatal error occurs.
    ///
    /// Returns the number of records relayed when the session is
    /// cancelled; any transport or sink failure ends the loop with an
    /// error instead.
    pub async fn run(mut self, mut sink: Box<dyn ActuatorSink>) -> Result<u64, ControlError> {
        let mut records_relayed: u64 = 0;

        loop {
            let record = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                record = read_record(&mut self.reader) => record?,
            };

            let command = translate(record);
            sink.write_command(command)?;
            sink.flush()?;

            records_relayed += 1;
            debug!(
                control = record.control,
                rotation = record.rotation,
                x_pan = record.x_pan,
                y_pan = record.y_pan,
                "control record relayed"
            );
        }

        Ok(records_relayed)
    }
}

/// Reads one complete record.  Field order matches the wire layout;
/// dropping the future between fields forwards nothing downstream.
async fn read_record<R>(reader: &mut R) -> Result<ControlRecord, ControlError>
where
    R: AsyncRead + Unpin,
{
    Ok(ControlRecord {
        control: read_field(reader, "control").await?,
        rotation: read_field(reader, "rotation").await?,
        x_pan: read_field(reader, "x_pan").await?,
        y_pan: read_field(reader, "y_pan").await?,
    })
}

async fn read_field<R>(reader: &mut R, field: &'static str) -> Result<i32, ControlError>
where
    R: AsyncRead + Unpin,
{
    reader
        .read_i32()
        .await
        .map_err(|source| ControlError::Transport { field, source })
}
