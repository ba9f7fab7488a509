//! Wire-level types for the rover teleoperation protocol.
//!
//! The protocol has two independent directions sharing one connection:
//!
//! - **Video (bridge → operator)**: a stream of length-prefixed encoded
//!   frames.  Each frame is `[4-byte big-endian length][payload]`.
//! - **Control (operator → bridge)**: a stream of fixed-size records.
//!   Each record is four big-endian `i32` fields with no header and no
//!   terminator.
//!
//! There are no acknowledgment or response messages in either direction.

// ── Protocol constants ────────────────────────────────────────────────────────

/// Size of the length prefix preceding every video frame, in bytes.
pub const FRAME_HEADER_SIZE: usize = 4;

/// Size of one control record on the wire: four big-endian `i32` fields.
pub const CONTROL_RECORD_SIZE: usize = 16;

// ── Control record ────────────────────────────────────────────────────────────

/// One atomic steering message from the operator.
///
/// The four fields arrive on the wire in declaration order.  `control` and
/// `rotation` are discrete command codes (see [`crate::command::translate`]
/// for the calibration tables); `x_pan` and `y_pan` are camera pan angles
/// in degrees.  The pan fields are *not* range-validated here: values
/// outside the nominal [-180, 0) window are carried through unchanged and
/// handled (or deliberately not handled) by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRecord {
    /// Drive command code (forward/back/left/right/stop).
    pub control: i32,
    /// Rotation command code (clockwise/counter-clockwise/stop).
    pub rotation: i32,
    /// Horizontal camera pan angle in degrees.
    pub x_pan: i32,
    /// Vertical camera pan angle in degrees.
    pub y_pan: i32,
}

impl ControlRecord {
    /// A record that commands no movement: every field zero.
    ///
    /// Note that a zero `control`/`rotation` is itself a listed command
    /// (stop), distinct from the unlisted codes that fall back to the idle
    /// byte.
    pub const fn zeroed() -> Self {
        ControlRecord {
            control: 0,
            rotation: 0,
            x_pan: 0,
            y_pan: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_record_size_matches_four_i32_fields() {
        // The wire size constant must stay in lockstep with the struct:
        // four i32 fields, four bytes each.
        assert_eq!(CONTROL_RECORD_SIZE, 4 * std::mem::size_of::<i32>());
    }

    #[test]
    fn test_zeroed_record_has_all_fields_zero() {
        let rec = ControlRecord::zeroed();
        assert_eq!(rec.control, 0);
        assert_eq!(rec.rotation, 0);
        assert_eq!(rec.x_pan, 0);
        assert_eq!(rec.y_pan, 0);
    }
}
