//! Infrastructure layer for the rover bridge.
//!
//! Contains device- and OS-facing adapters: camera frame sources, the
//! actuator serial link, operator transport setup, and configuration
//! storage.
//!
//! Each adapter module defines the trait the application layer consumes
//! (`FrameSource`, `ActuatorSink`), the concrete implementation, and a
//! public mock so tests can run the full session without hardware.

pub mod actuator;
pub mod camera;
pub mod network;
pub mod storage;
