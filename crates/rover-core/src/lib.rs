//! # rover-core
//!
//! Shared library for the rover teleoperation bridge containing the wire
//! codec and the actuator command translation tables.
//!
//! This crate is used by the bridge binary and by anything that needs to
//! speak the operator protocol (test clients, tooling).  It has zero
//! dependencies on OS APIs, sockets, or serial ports.
//!
//! # Architecture overview (for beginners)
//!
//! The rover bridge sits between an operator app and a small wheeled rover:
//! camera frames flow out to the operator over TCP, steering commands flow
//! back in, and each command is rewritten into the opcode bytes the rover's
//! firmware understands before going out the serial port.
//!
//! This crate is the pure middle of that pipeline.  It defines:
//!
//! - **`protocol`** – How bytes travel over the network.  Video frames are
//!   length-prefixed blobs; control records are four big-endian `i32`
//!   fields read as one atomic message.
//!
//! - **`command`** – The translation tables that turn one decoded control
//!   record into the 4-byte-plus-newline command the firmware expects.
//!   These tables encode the physical calibration of the vehicle.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/protocol/mod.rs).
pub mod command;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `rover_core::ControlRecord` instead of `rover_core::protocol::messages::ControlRecord`.
pub use command::{translate, ActuatorCommand, COMMAND_TERMINATOR, IDLE_CODE};
pub use protocol::codec::{
    decode_control_record, decode_frame_header, encode_control_record, encode_frame_header,
    ProtocolError,
};
pub use protocol::messages::{ControlRecord, CONTROL_RECORD_SIZE, FRAME_HEADER_SIZE};
