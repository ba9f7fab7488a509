//! Application layer: the use cases that give a session its behaviour.
//!
//! This layer owns the loops and the coordination between them, but no
//! device or socket specifics; those live behind the adapter traits in
//! [`crate::infrastructure`].
//!
//! - **`stream_video`** – captures frames and sends them length-prefixed
//!   to the operator.
//! - **`relay_control`** – reads operator control records, translates
//!   them with `rover-core`, and drives the actuator.
//! - **`session`** – wraps one accepted connection, runs the units for
//!   the configured mode, and turns the first fatal error into a single
//!   session outcome.

pub mod relay_control;
pub mod session;
pub mod stream_video;
