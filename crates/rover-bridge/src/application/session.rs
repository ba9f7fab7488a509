//! Session coordination: one operator connection, up to two concurrent
//! units of work.
//!
//! A [`Session`] owns the accepted connection and a cancellation token.
//! `run_both` splits the stream and spawns the video sender and the
//! control relay as independent tasks; whichever unit exits first, for
//! any reason, cancels the shared token so the sibling winds down at its
//! next loop boundary.  The single-unit modes drive their one loop on
//! the calling task and the unused direction of the stream is simply
//! never touched.
//!
//! A session ends exactly once: either cancelled (clean, with counters)
//! or on the first fatal unit error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::relay_control::{ControlError, RelayControlUseCase};
use crate::application::stream_video::{StreamVideoUseCase, VideoError};
use crate::infrastructure::actuator::ActuatorSink;
use crate::infrastructure::camera::FrameSource;

// ── run mode ────────────────────────────────────────────────────────────

/// Which units a session runs.  Chosen at startup and fixed for the
/// session's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Outbound video only; the inbound direction is never read.
    Video,
    /// Inbound control only; no frames are sent.
    Control,
    /// Both directions concurrently over the same connection.
    Both,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Video => "video",
            RunMode::Control => "control",
            RunMode::Both => "both",
        };
        f.write_str(name)
    }
}

/// Error returned when a run mode name cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mode {0:?}: expected video, control, or both")]
pub struct ParseRunModeError(String);

impl FromStr for RunMode {
    type Err = ParseRunModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(RunMode::Video),
            "control" => Ok(RunMode::Control),
            "both" => Ok(RunMode::Both),
            other => Err(ParseRunModeError(other.to_string())),
        }
    }
}

// ── session ─────────────────────────────────────────────────────────────

/// Error type for a completed session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The video unit hit a fatal error.
    #[error("video unit failed: {0}")]
    Video(#[from] VideoError),

    /// The control unit hit a fatal error.
    #[error("control unit failed: {0}")]
    Control(#[from] ControlError),

    /// A unit task panicked instead of returning.
    #[error("session unit panicked: {0}")]
    UnitPanicked(#[from] tokio::task::JoinError),
}

/// Counters reported by a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_sent: u64,
    pub records_relayed: u64,
}

/// One operator connection and the units that serve it.
pub struct Session {
    id: Uuid,
    stream: TcpStream,
    cancel: CancellationToken,
}

impl Session {
    /// Wraps an accepted connection in a new session.
    pub fn new(stream: TcpStream) -> Self {
        Self {
            id: Uuid::new_v4(),
            stream,
            cancel: CancellationToken::new(),
        }
    }

    /// Identifier carried by every log line this session emits.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Token outside observers (such as a Ctrl-C handler) use to end the
    /// session cooperatively.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the video unit alone until cancellation or a fatal error.
    pub async fn run_video(self, camera: Box<dyn FrameSource>) -> Result<SessionStats, SessionError> {
        info!(session = %self.id, mode = %RunMode::Video, "session started");

        let video = StreamVideoUseCase::new(self.stream, self.cancel.clone());
        let frames_sent = video.run(camera).await?;

        let stats = SessionStats {
            frames_sent,
            records_relayed: 0,
        };
        info!(session = %self.id, frames = stats.frames_sent, "session finished");
        Ok(stats)
    }

    /// Runs the control unit alone until cancellation or a fatal error.
    pub async fn run_control(self, sink: Box<dyn ActuatorSink>) -> Result<SessionStats, SessionError> {
        info!(session = %self.id, mode = %RunMode::Control, "session started");

        let control = RelayControlUseCase::new(self.stream, self.cancel.clone());
        let records_relayed = control.run(sink).await?;

        let stats = SessionStats {
            frames_sent: 0,
            records_relayed,
        };
        info!(session = %self.id, records = stats.records_relayed, "session finished");
        Ok(stats)
    }

    /// Runs both units concurrently over the split connection.
    ///
    /// The units are independent except for the shared token: the first
    /// one to exit cancels it, so a fatal error on either side also ends
    /// the sibling.  When both fail, the video error is reported and the
    /// control error is logged as a secondary failure.
    pub async fn run_both(
        self,
        camera: Box<dyn FrameSource>,
        sink: Box<dyn ActuatorSink>,
    ) -> Result<SessionStats, SessionError> {
        info!(session = %self.id, mode = %RunMode::Both, "session started");

        let (read_half, write_half) = self.stream.into_split();
        let video = StreamVideoUseCase::new(write_half, self.cancel.clone());
        let control = RelayControlUseCase::new(read_half, self.cancel.clone());

        let video_task = tokio::spawn({
            let cancel = self.cancel.clone();
            async move {
                let result = video.run(camera).await;
                cancel.cancel();
                result
            }
        });
        let control_task = tokio::spawn({
            let cancel = self.cancel.clone();
            async move {
                let result = control.run(sink).await;
                cancel.cancel();
                result
            }
        });

        let (video_joined, control_joined) = tokio::join!(video_task, control_task);
        let video_result = video_joined?;
        let control_result = control_joined?;

        match (video_result, control_result) {
            (Ok(frames_sent), Ok(records_relayed)) => {
                let stats = SessionStats {
                    frames_sent,
                    records_relayed,
                };
                info!(
                    session = %self.id,
                    frames = stats.frames_sent,
                    records = stats.records_relayed,
                    "session finished"
                );
                Ok(stats)
            }
            (Err(video_err), control_result) => {
                if let Err(control_err) = control_result {
                    warn!(
                        session = %self.id,
                        error = %control_err,
                        "control unit also failed"
                    );
                }
                Err(SessionError::Video(video_err))
            }
            (Ok(_), Err(control_err)) => Err(SessionError::Control(control_err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_parses_config_names() {
        // Arrange / Act / Assert
        assert_eq!("video".parse::<RunMode>(), Ok(RunMode::Video));
        assert_eq!("control".parse::<RunMode>(), Ok(RunMode::Control));
        assert_eq!("both".parse::<RunMode>(), Ok(RunMode::Both));
    }

    #[test]
    fn test_run_mode_rejects_unknown_names() {
        // Arrange / Act
        let result = "telemetry".parse::<RunMode>();

        // Assert
        assert_eq!(result, Err(ParseRunModeError("telemetry".to_string())));
    }

    #[test]
    fn test_run_mode_display_round_trips_through_parse() {
        // Arrange
        let modes = [RunMode::Video, RunMode::Control, RunMode::Both];

        // Act / Assert
        for mode in modes {
            assert_eq!(mode.to_string().parse::<RunMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_session_stats_default_is_zeroed() {
        // Arrange / Act
        let stats = SessionStats::default();

        // Assert
        assert_eq!(stats.frames_sent, 0);
        assert_eq!(stats.records_relayed, 0);
    }
}
